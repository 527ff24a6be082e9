//! Node schema: common fields plus a per-type content variant

use serde::{Deserialize, Serialize};

use super::symbols::{Anchor, ElementKind, FillStyle, ImageKind, TextAnchor};

/// Stable identifier of a node, unique across its tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node_{}", self.0)
    }
}

/// A pair of logical units (position or size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Three color channels, 0-255 by convention
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

impl From<[f64; 3]> for Rgb {
    fn from([r, g, b]: [f64; 3]) -> Self {
        Self { r, g, b }
    }
}

/// Background fill of a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub color: Rgb,
    pub alpha: f64,
    pub style: FillStyle,
}

/// A color/alpha pair used by button states
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateColor {
    pub color: Rgb,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextProps {
    pub label: String,
    pub color: Rgb,
    pub alpha: f64,
    pub size: f64,
    pub anchor: TextAnchor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageProps {
    pub kind: ImageKind,
    pub color: Rgb,
    pub alpha: f64,
}

/// Button colors: the resting color plus one pair per interaction state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonProps {
    pub base: StateColor,
    pub disabled: StateColor,
    pub pressed: StateColor,
    pub hover: StateColor,
    pub focused: StateColor,
    pub enabled: bool,
}

/// Type-specific fields of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Content {
    Container,
    Text(TextProps),
    Image(ImageProps),
    Button(ButtonProps),
}

impl Content {
    pub fn kind(&self) -> ElementKind {
        match self {
            Content::Container => ElementKind::Container,
            Content::Text(_) => ElementKind::Text,
            Content::Image(_) => ElementKind::Image,
            Content::Button(_) => ElementKind::Button,
        }
    }
}

/// A single element of the tree
///
/// Parent and child links are ids into the owning [`super::ElementTree`];
/// they are maintained by the tree and read-only from outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    /// Offset from the anchor point inside the parent
    pub position: Vec2,
    pub size: Vec2,
    pub anchor: Anchor,
    pub visible: bool,
    pub padding: f64,
    pub background: Fill,
    pub locked: bool,
    /// Opaque data owned by other tooling, carried through unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced: Option<serde_json::Value>,
    pub content: Content,
    #[serde(default)]
    pub(crate) parent: Option<NodeId>,
    #[serde(default)]
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub fn kind(&self) -> ElementKind {
        self.content.kind()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Text props if this is a text node
    pub fn text(&self) -> Option<&TextProps> {
        match &self.content {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn button(&self) -> Option<&ButtonProps> {
        match &self.content {
            Content::Button(button) => Some(button),
            _ => None,
        }
    }

    pub fn image(&self) -> Option<&ImageProps> {
        match &self.content {
            Content::Image(image) => Some(image),
            _ => None,
        }
    }
}
