//! Default table used by the node factory and the import normalizer
//!
//! The table is a TOML document. A built-in table is always present; a user
//! table only needs the keys it overrides and is merged on top of it.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::node::{
    ButtonProps, Content, Fill, ImageProps, Node, NodeId, Rgb, StateColor, TextProps, Vec2,
};
use super::symbols::{Anchor, ElementKind, FillStyle, ImageKind, SymbolEnum, TextAnchor};

/// Errors that can occur when loading a default table
#[derive(Error, Debug)]
pub enum DefaultsError {
    #[error("Failed to read defaults file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse defaults TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Built-in defaults for every node field
const DEFAULT_TABLE: &str = r#"
[node]
position = [0.0, 0.0]
size = [200.0, 100.0]
anchor = "TopLeft"
visible = true
padding = 0.0
locked = false

[node.background]
color = [255.0, 255.0, 255.0]
alpha = 1.0
style = "Solid"

[text]
label = "Label"
color = [0.0, 0.0, 0.0]
alpha = 1.0
size = 14.0
anchor = "MiddleCenter"

[image]
kind = "Sprite"
color = [255.0, 255.0, 255.0]
alpha = 1.0

[button]
enabled = true
base = { color = [52.0, 120.0, 246.0], alpha = 1.0 }
disabled = { color = [160.0, 160.0, 160.0], alpha = 0.5 }
pressed = { color = [30.0, 90.0, 200.0], alpha = 1.0 }
hover = { color = [80.0, 145.0, 255.0], alpha = 1.0 }
focused = { color = [52.0, 120.0, 246.0], alpha = 1.0 }
"#;

#[derive(Deserialize)]
struct TomlDefaults {
    node: TomlNode,
    text: TomlText,
    image: TomlImage,
    button: TomlButton,
}

#[derive(Deserialize)]
struct TomlNode {
    position: [f64; 2],
    size: [f64; 2],
    anchor: Anchor,
    visible: bool,
    padding: f64,
    locked: bool,
    background: TomlFill,
}

#[derive(Deserialize)]
struct TomlFill {
    color: [f64; 3],
    alpha: f64,
    style: FillStyle,
}

#[derive(Deserialize)]
struct TomlText {
    label: String,
    color: [f64; 3],
    alpha: f64,
    size: f64,
    anchor: TextAnchor,
}

#[derive(Deserialize)]
struct TomlImage {
    kind: ImageKind,
    color: [f64; 3],
    alpha: f64,
}

#[derive(Deserialize)]
struct TomlStateColor {
    color: [f64; 3],
    alpha: f64,
}

impl From<TomlStateColor> for StateColor {
    fn from(value: TomlStateColor) -> Self {
        StateColor {
            color: value.color.into(),
            alpha: value.alpha,
        }
    }
}

#[derive(Deserialize)]
struct TomlButton {
    enabled: bool,
    base: TomlStateColor,
    disabled: TomlStateColor,
    pressed: TomlStateColor,
    hover: TomlStateColor,
    focused: TomlStateColor,
}

/// Field values a freshly created node starts from
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDefaults {
    pub position: Vec2,
    pub size: Vec2,
    pub anchor: Anchor,
    pub visible: bool,
    pub padding: f64,
    pub locked: bool,
    pub background: Fill,
    pub text: TextProps,
    pub image: ImageProps,
    pub button: ButtonProps,
}

impl NodeDefaults {
    /// Load a default table from a TOML file, merged over the built-in table
    pub fn from_file(path: &Path) -> Result<Self, DefaultsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a default table from a TOML string, merged over the built-in table
    pub fn from_str(content: &str) -> Result<Self, DefaultsError> {
        let mut table: toml::Table = DEFAULT_TABLE.parse()?;
        let overrides: toml::Table = content.parse()?;
        merge_tables(&mut table, overrides);

        let parsed: TomlDefaults = toml::Value::Table(table).try_into()?;
        Ok(parsed.into())
    }

    /// Type-specific fields for a new node of `kind`
    pub fn content(&self, kind: ElementKind) -> Content {
        match kind {
            ElementKind::Container => Content::Container,
            ElementKind::Text => Content::Text(self.text.clone()),
            ElementKind::Image => Content::Image(self.image.clone()),
            ElementKind::Button => Content::Button(self.button.clone()),
        }
    }

    /// Build an unattached node with every field seeded from this table.
    /// The node is named after its kind.
    pub fn node(&self, id: NodeId, kind: ElementKind) -> Node {
        Node {
            id,
            name: kind.name().to_string(),
            position: self.position,
            size: self.size,
            anchor: self.anchor,
            visible: self.visible,
            padding: self.padding,
            background: self.background,
            locked: self.locked,
            advanced: None,
            content: self.content(kind),
            parent: None,
            children: Vec::new(),
        }
    }
}

impl From<TomlDefaults> for NodeDefaults {
    fn from(t: TomlDefaults) -> Self {
        NodeDefaults {
            position: t.node.position.into(),
            size: t.node.size.into(),
            anchor: t.node.anchor,
            visible: t.node.visible,
            padding: t.node.padding,
            locked: t.node.locked,
            background: Fill {
                color: t.node.background.color.into(),
                alpha: t.node.background.alpha,
                style: t.node.background.style,
            },
            text: TextProps {
                label: t.text.label,
                color: Rgb::from(t.text.color),
                alpha: t.text.alpha,
                size: t.text.size,
                anchor: t.text.anchor,
            },
            image: ImageProps {
                kind: t.image.kind,
                color: t.image.color.into(),
                alpha: t.image.alpha,
            },
            button: ButtonProps {
                base: t.button.base.into(),
                disabled: t.button.disabled.into(),
                pressed: t.button.pressed.into(),
                hover: t.button.hover.into(),
                focused: t.button.focused.into(),
                enabled: t.button.enabled,
            },
        }
    }
}

impl Default for NodeDefaults {
    fn default() -> Self {
        Self::from_str("").expect("Built-in default table should be valid TOML")
    }
}

/// Recursively overlay `overrides` onto `base`; nested tables merge, other values replace
fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        if let toml::Value::Table(incoming) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, incoming);
                continue;
            }
            base.insert(key, toml::Value::Table(incoming));
        } else {
            base.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let defaults = NodeDefaults::default();
        assert_eq!(defaults.size, Vec2::new(200.0, 100.0));
        assert_eq!(defaults.anchor, Anchor::TopLeft);
        assert!(defaults.visible);
        assert_eq!(defaults.text.anchor, TextAnchor::MiddleCenter);
        assert!(defaults.button.enabled);
    }

    #[test]
    fn test_partial_override_keeps_other_keys() {
        let defaults = NodeDefaults::from_str(
            r#"
[node]
size = [64.0, 32.0]

[node.background]
style = "Rounded"

[button.hover]
alpha = 0.25
"#,
        )
        .expect("Should parse");
        assert_eq!(defaults.size, Vec2::new(64.0, 32.0));
        assert_eq!(defaults.position, Vec2::new(0.0, 0.0));
        assert_eq!(defaults.background.style, FillStyle::Rounded);
        assert_eq!(defaults.background.alpha, 1.0);
        assert_eq!(defaults.button.hover.alpha, 0.25);
        assert_eq!(defaults.button.hover.color, Rgb::new(80.0, 145.0, 255.0));
    }

    #[test]
    fn test_unknown_enum_member_is_rejected() {
        let result = NodeDefaults::from_str("[node]\nanchor = \"Nowhere\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_toml_error() {
        assert!(NodeDefaults::from_str("this is not valid toml {{{{").is_err());
    }

    #[test]
    fn test_factory_seeds_every_field() {
        let defaults = NodeDefaults::default();
        let node = defaults.node(NodeId(7), ElementKind::Button);
        assert_eq!(node.name, "Button");
        assert_eq!(node.size, defaults.size);
        assert_eq!(node.button(), Some(&defaults.button));
        assert!(node.children().is_empty());
        assert_eq!(node.parent(), None);
    }
}
