//! Normalization of resolved records into a fully specified element tree
//!
//! Every node starts from the default table and each recognized field that
//! is present overrides it. Values that cannot be coerced keep the default
//! and are reported with `tracing::warn!`.

use tracing::{trace, warn};

use crate::error::ImportError;
use crate::model::fields;
use crate::model::symbols::{enum_table, SymbolEnum};
use crate::model::{
    Anchor, Content, ElementKind, ElementTree, FillStyle, ImageKind, Node, NodeDefaults, NodeId,
    Rgb, StateColor, TextAnchor, Vec2,
};
use crate::parser::ast::{Record, Value};
use crate::serializer::format_number;

/// Build a tree with one root per record
pub fn normalize(records: &[Record], defaults: &NodeDefaults) -> Result<ElementTree, ImportError> {
    let mut tree = ElementTree::with_defaults(defaults.clone());
    for record in records {
        build(&mut tree, record, None)?;
    }
    Ok(tree)
}

fn build(
    tree: &mut ElementTree,
    record: &Record,
    parent: Option<NodeId>,
) -> Result<NodeId, ImportError> {
    let kind = read(record, fields::TYPE, as_enum::<ElementKind>).unwrap_or(ElementKind::Container);
    let id = tree
        .create(kind, parent)
        .map_err(|e| ImportError::structural(0..0, e.to_string()))?;

    if let Some(node) = tree.get_mut(id) {
        apply_common(node, record);
        apply_content(&mut node.content, record);
        trace!(%id, kind = %kind, name = %node.name, "normalized node");
    }

    match record.get(fields::CHILDREN) {
        None | Some(Value::Null) => {}
        Some(Value::Array(children)) => {
            for child in children {
                match child {
                    Value::Object(child) => {
                        build(tree, child, Some(id))?;
                    }
                    other => warn!(parent = %id, value = ?other, "skipping non-object child"),
                }
            }
        }
        Some(other) => warn!(parent = %id, value = ?other, "children is not an array, ignoring"),
    }

    Ok(id)
}

fn apply_common(node: &mut Node, record: &Record) {
    if let Some(name) = read(record, fields::NAME, as_string) {
        node.name = name;
    }
    if let Some(position) = read(record, fields::POSITION, as_vec2) {
        node.position = position;
    }
    if let Some(size) = read(record, fields::SIZE, as_vec2) {
        node.size = size;
    }
    if let Some(anchor) = read(record, fields::ANCHOR, as_enum::<Anchor>) {
        node.anchor = anchor;
    }
    if let Some(visible) = read(record, fields::VISIBLE, as_bool) {
        node.visible = visible;
    }
    if let Some(padding) = read(record, fields::PADDING, as_number) {
        node.padding = padding;
    }
    if let Some(color) = read(record, fields::BACKGROUND_COLOR, as_rgb) {
        node.background.color = color;
    }
    if let Some(alpha) = read(record, fields::BACKGROUND_ALPHA, as_number) {
        node.background.alpha = alpha;
    }
    if let Some(style) = read(record, fields::FILL_STYLE, as_enum::<FillStyle>) {
        node.background.style = style;
    }
    if let Some(locked) = read(record, fields::LOCKED, as_bool) {
        node.locked = locked;
    }
}

fn apply_content(content: &mut Content, record: &Record) {
    match content {
        Content::Container => {}
        Content::Text(text) => {
            if let Some(label) = read(record, fields::LABEL, as_string) {
                text.label = label;
            }
            if let Some(color) = read(record, fields::TEXT_COLOR, as_rgb) {
                text.color = color;
            }
            if let Some(alpha) = read(record, fields::TEXT_ALPHA, as_number) {
                text.alpha = alpha;
            }
            if let Some(size) = read(record, fields::TEXT_SIZE, as_number) {
                text.size = size;
            }
            if let Some(anchor) = read(record, fields::TEXT_ANCHOR, as_enum::<TextAnchor>) {
                text.anchor = anchor;
            }
        }
        Content::Image(image) => {
            if let Some(kind) = read(record, fields::IMAGE_KIND, as_enum::<ImageKind>) {
                image.kind = kind;
            }
            if let Some(color) = read(record, fields::IMAGE_COLOR, as_rgb) {
                image.color = color;
            }
            if let Some(alpha) = read(record, fields::IMAGE_ALPHA, as_number) {
                image.alpha = alpha;
            }
        }
        Content::Button(button) => {
            let states = [
                &mut button.base,
                &mut button.disabled,
                &mut button.pressed,
                &mut button.hover,
                &mut button.focused,
            ];
            for (state, (color_key, alpha_key)) in states.into_iter().zip(fields::BUTTON_STATES) {
                apply_state(state, record, color_key, alpha_key);
            }
            if let Some(enabled) = read(record, fields::ENABLED, as_bool) {
                button.enabled = enabled;
            }
        }
    }
}

fn apply_state(state: &mut StateColor, record: &Record, color_key: &str, alpha_key: &str) {
    if let Some(color) = read(record, color_key, as_rgb) {
        state.color = color;
    }
    if let Some(alpha) = read(record, alpha_key, as_number) {
        state.alpha = alpha;
    }
}

/// Coerce `record[key]`. Absent and `null` fields yield `None` silently;
/// present values that fail to coerce are logged.
fn read<T>(record: &Record, key: &str, coerce: impl Fn(&Value) -> Option<T>) -> Option<T> {
    let value = record.get(key)?;
    if matches!(value, Value::Null) {
        return None;
    }
    let coerced = coerce(value);
    if coerced.is_none() {
        warn!(field = key, value = ?value, "unrecognized value, using default");
    }
    coerced
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(*n != 0.0),
        _ => None,
    }
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(format_number(*n)),
        _ => None,
    }
}

/// Numbers from an array, or from the named fields of an object
fn as_numbers<const N: usize>(value: &Value, names: [&str; N]) -> Option<[f64; N]> {
    let mut out = [0.0; N];
    match value {
        Value::Array(items) if items.len() == N => {
            for (slot, item) in out.iter_mut().zip(items) {
                *slot = as_number(item)?;
            }
        }
        Value::Object(record) => {
            for (slot, name) in out.iter_mut().zip(names) {
                *slot = as_number(record.get(name)?)?;
            }
        }
        _ => return None,
    }
    Some(out)
}

fn as_vec2(value: &Value) -> Option<Vec2> {
    as_numbers(value, ["x", "y"]).map(Vec2::from)
}

fn as_rgb(value: &Value) -> Option<Rgb> {
    as_numbers(value, ["r", "g", "b"]).map(Rgb::from)
}

/// Enum members may arrive as qualified references, ordinals or bare names.
/// A reference into another table with the same member name is accepted.
fn as_enum<E: SymbolEnum>(value: &Value) -> Option<E> {
    match value {
        Value::Enum { table, ordinal } if *table == E::TABLE.name => E::from_ordinal(*ordinal),
        Value::Enum { table, ordinal } => enum_table(table)
            .and_then(|t| t.name_of(*ordinal))
            .and_then(E::from_name),
        Value::Number(n) if n.fract() == 0.0 => E::from_ordinal(*n as i64),
        Value::String(s) => E::from_name(s.rsplit('.').next().unwrap_or(s)),
        _ => None,
    }
}
