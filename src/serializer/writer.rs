//! Code emission for element trees
//!
//! Each node becomes an object literal inside a `Blueprint.Build(...)` call.
//! Fields are emitted one per line in a fixed order, and records never carry
//! trailing commas.

use crate::model::fields;
use crate::model::symbols::{SymbolEnum, CALL_MARKER, NAMESPACE, STRING_KEYS};
use crate::model::{ButtonProps, Content, ElementTree, Node, NodeId, Rgb, Vec2};

use super::config::SerializerConfig;
use super::format::{binding_identifiers, format_number, is_plain_identifier, quote_string};
use super::strings::{string_key, StringTable};

/// How button state fields are emitted
#[derive(Debug, Clone, Copy, PartialEq)]
enum ButtonMode {
    /// All state pairs, with `enabled` always `true`
    ForceEnabled,
    /// State pairs only for enabled buttons; `enabled` carries the stored flag
    Stored,
}

/// Builder for emitted code
struct CodeBuilder<'a> {
    tree: &'a ElementTree,
    localization: &'a StringTable,
    config: &'a SerializerConfig,
    buttons: ButtonMode,
}

impl<'a> CodeBuilder<'a> {
    fn new(
        tree: &'a ElementTree,
        localization: &'a StringTable,
        config: &'a SerializerConfig,
        buttons: ButtonMode,
    ) -> Self {
        Self {
            tree,
            localization,
            config,
            buttons,
        }
    }

    fn indent(&self, depth: usize) -> String {
        self.config.indent.repeat(depth)
    }

    /// `<keyword> <name> = Blueprint.Build(`
    fn declaration_head(&self, binding: &str) -> String {
        format!(
            "{} {} = {}(",
            self.config.binding_keyword, binding, CALL_MARKER
        )
    }

    /// Object literal for `id` and its subtree. The opening brace is not
    /// indented; the closing brace is indented to `depth`.
    fn record(&self, id: NodeId, depth: usize) -> String {
        let Some(node) = self.tree.get(id) else {
            return "{}".to_string();
        };

        let mut entries = self.common_fields(node);
        match &node.content {
            Content::Container => {}
            Content::Text(text) => {
                entries.push((fields::LABEL, self.label(node, &text.label)));
                entries.push((fields::TEXT_COLOR, color(text.color)));
                entries.push((fields::TEXT_ALPHA, format_number(text.alpha)));
                entries.push((fields::TEXT_SIZE, format_number(text.size)));
                entries.push((fields::TEXT_ANCHOR, text.anchor.qualified()));
            }
            Content::Image(image) => {
                entries.push((fields::IMAGE_KIND, image.kind.qualified()));
                entries.push((fields::IMAGE_COLOR, color(image.color)));
                entries.push((fields::IMAGE_ALPHA, format_number(image.alpha)));
            }
            Content::Button(button) => self.button_fields(button, &mut entries),
        }

        let children = self.tree.children(id);
        if !children.is_empty() {
            entries.push((fields::CHILDREN, self.children(children, depth + 1)));
        }

        let inner = self.indent(depth + 1);
        let body = entries
            .iter()
            .map(|(key, value)| format!("{}{}: {}", inner, key, value))
            .collect::<Vec<_>>()
            .join(",\n");
        format!("{{\n{}\n{}}}", body, self.indent(depth))
    }

    fn common_fields(&self, node: &Node) -> Vec<(&'static str, String)> {
        vec![
            (fields::NAME, quote_string(&node.name)),
            (fields::TYPE, node.kind().qualified()),
            (fields::POSITION, vector(node.position)),
            (fields::SIZE, vector(node.size)),
            (fields::ANCHOR, node.anchor.qualified()),
            (fields::VISIBLE, node.visible.to_string()),
            (fields::PADDING, format_number(node.padding)),
            (fields::BACKGROUND_COLOR, color(node.background.color)),
            (fields::BACKGROUND_ALPHA, format_number(node.background.alpha)),
            (fields::FILL_STYLE, node.background.style.qualified()),
            (fields::LOCKED, node.locked.to_string()),
        ]
    }

    fn button_fields(&self, button: &ButtonProps, entries: &mut Vec<(&'static str, String)>) {
        let enabled = match self.buttons {
            ButtonMode::ForceEnabled => true,
            ButtonMode::Stored => button.enabled,
        };
        if enabled {
            let states = [
                &button.base,
                &button.disabled,
                &button.pressed,
                &button.hover,
                &button.focused,
            ];
            for (state, (color_key, alpha_key)) in states.into_iter().zip(fields::BUTTON_STATES) {
                entries.push((color_key, color(state.color)));
                entries.push((alpha_key, format_number(state.alpha)));
            }
        }
        entries.push((fields::ENABLED, enabled.to_string()));
    }

    /// Localization reference when the table has text for this node,
    /// otherwise the literal label
    fn label(&self, node: &Node, label: &str) -> String {
        let key = string_key(&node.name);
        let has_entry = self
            .localization
            .get(&key)
            .is_some_and(|text| !text.is_empty());
        if has_entry && is_plain_identifier(&key) {
            format!("{}.{}.{}", NAMESPACE, STRING_KEYS, key)
        } else {
            quote_string(label)
        }
    }

    /// Array of child records; the closing bracket is indented to `depth`
    fn children(&self, children: &[NodeId], depth: usize) -> String {
        let inner = self.indent(depth + 1);
        let items = children
            .iter()
            .map(|child| format!("{}{}", inner, self.record(*child, depth + 1)))
            .collect::<Vec<_>>()
            .join(",\n");
        format!("[\n{}\n{}]", items, self.indent(depth))
    }
}

fn vector(v: Vec2) -> String {
    format!("[{}, {}]", format_number(v.x), format_number(v.y))
}

fn color(c: Rgb) -> String {
    format!(
        "[{}, {}, {}]",
        format_number(c.r),
        format_number(c.g),
        format_number(c.b)
    )
}

/// One declaration per root, each bound to a distinct identifier derived
/// from the root's name. Buttons are always emitted as enabled.
pub fn serialize(
    tree: &ElementTree,
    localization: &StringTable,
    config: &SerializerConfig,
) -> String {
    let builder = CodeBuilder::new(tree, localization, config, ButtonMode::ForceEnabled);
    let roots = tree.roots();
    let names = binding_identifiers(
        roots
            .iter()
            .map(|id| tree.get(*id).map(|n| n.name.as_str()).unwrap_or("")),
    );

    let mut out = String::new();
    for (i, (root, binding)) in roots.iter().zip(&names).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&builder.declaration_head(binding));
        out.push_str(&builder.record(*root, 0));
        out.push_str(")\n");
    }
    out
}

/// A single declaration whose call takes one argument per root. Button
/// state fields follow each button's stored `enabled` flag.
pub fn serialize_combined(
    tree: &ElementTree,
    localization: &StringTable,
    config: &SerializerConfig,
) -> String {
    if tree.is_empty() {
        return String::new();
    }
    let builder = CodeBuilder::new(tree, localization, config, ButtonMode::Stored);
    let inner = builder.indent(1);
    let arguments = tree
        .roots()
        .iter()
        .map(|root| format!("{}{}", inner, builder.record(*root, 1)))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "{}\n{}\n)\n",
        builder.declaration_head(&config.combined_binding),
        arguments
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementKind;
    use pretty_assertions::assert_eq;

    fn config() -> SerializerConfig {
        SerializerConfig::default()
    }

    #[test]
    fn test_empty_tree() {
        let tree = ElementTree::new();
        assert_eq!(serialize(&tree, &StringTable::new(), &config()), "");
        assert_eq!(serialize_combined(&tree, &StringTable::new(), &config()), "");
    }

    #[test]
    fn test_container_exact_output() {
        let mut tree = ElementTree::new();
        let id = tree.create(ElementKind::Container, None).unwrap();
        tree.get_mut(id).unwrap().name = "Main Menu".to_string();

        let expected = "\
local mainMenu = Blueprint.Build({
    name: \"Main Menu\",
    type: Blueprint.ElementType.Container,
    position: [0, 0],
    size: [200, 100],
    anchor: Blueprint.Anchor.TopLeft,
    visible: true,
    padding: 0,
    backgroundColor: [255, 255, 255],
    backgroundAlpha: 1,
    fillStyle: Blueprint.FillStyle.Solid,
    locked: false
})
";
        assert_eq!(serialize(&tree, &StringTable::new(), &config()), expected);
    }

    #[test]
    fn test_children_nested() {
        let mut tree = ElementTree::new();
        let root = tree.create(ElementKind::Container, None).unwrap();
        tree.create(ElementKind::Image, Some(root)).unwrap();

        let code = serialize(&tree, &StringTable::new(), &config());
        assert!(code.contains("    children: [\n        {\n            name: \"Image\","));
        assert!(code.contains("            imageKind: Blueprint.ImageKind.Sprite,"));
        assert!(code.ends_with("        }\n    ]\n})\n"));
    }

    #[test]
    fn test_label_reference() {
        let mut tree = ElementTree::new();
        let id = tree.create(ElementKind::Text, None).unwrap();
        tree.get_mut(id).unwrap().name = "Play Title".to_string();

        let table: StringTable = [("Play_Title".to_string(), "Play".to_string())]
            .into_iter()
            .collect();
        let code = serialize(&tree, &table, &config());
        assert!(code.contains("label: Blueprint.stringkeys.Play_Title,"));

        let code = serialize(&tree, &StringTable::new(), &config());
        assert!(code.contains("label: \"Label\","));
    }

    #[test]
    fn test_label_reference_requires_identifier_key() {
        let mut tree = ElementTree::new();
        let id = tree.create(ElementKind::Text, None).unwrap();
        tree.get_mut(id).unwrap().name = "Title!".to_string();

        let table: StringTable = [("Title!".to_string(), "Hi".to_string())]
            .into_iter()
            .collect();
        let code = serialize(&tree, &table, &config());
        assert!(code.contains("label: \"Label\","));
    }

    #[test]
    fn test_button_forced_enabled_per_node() {
        let mut tree = ElementTree::new();
        let id = tree.create(ElementKind::Button, None).unwrap();
        if let Content::Button(button) = &mut tree.get_mut(id).unwrap().content {
            button.enabled = false;
        }

        let code = serialize(&tree, &StringTable::new(), &config());
        assert!(code.contains("enabled: true"));
        assert!(code.contains("hoverColor: [80, 145, 255]"));
        assert!(code.contains("disabledAlpha: 0.5"));
    }

    #[test]
    fn test_button_stored_flag_combined() {
        let mut tree = ElementTree::new();
        let on = tree.create(ElementKind::Button, None).unwrap();
        let off = tree.create(ElementKind::Button, None).unwrap();
        tree.get_mut(on).unwrap().name = "On".to_string();
        if let Content::Button(button) = &mut tree.get_mut(off).unwrap().content {
            button.enabled = false;
        }

        let code = serialize_combined(&tree, &StringTable::new(), &config());
        assert!(code.starts_with("local layout = Blueprint.Build(\n    {\n"));
        assert!(code.ends_with("    }\n)\n"));
        assert_eq!(code.matches("buttonColor").count(), 1);
        assert_eq!(code.matches("enabled: false").count(), 1);
        assert_eq!(code.matches("enabled: true").count(), 1);
    }

    #[test]
    fn test_multiple_roots_get_distinct_bindings() {
        let mut tree = ElementTree::new();
        tree.create(ElementKind::Container, None).unwrap();
        tree.create(ElementKind::Container, None).unwrap();

        let code = serialize(&tree, &StringTable::new(), &config());
        assert!(code.contains("local container = Blueprint.Build({"));
        assert!(code.contains("\n\nlocal container2 = Blueprint.Build({"));
    }
}
