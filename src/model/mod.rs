//! Element tree data model
//!
//! Node schema, the arena-backed tree that owns nodes, the default table the
//! node factory seeds from, and the symbolic enum tables shared with the
//! text encoding.

pub mod defaults;
pub mod fields;
pub mod node;
pub mod symbols;
pub mod tree;

pub use defaults::{DefaultsError, NodeDefaults};
pub use node::{
    ButtonProps, Content, Fill, ImageProps, Node, NodeId, Rgb, StateColor, TextProps, Vec2,
};
pub use symbols::{
    enum_table, Anchor, ElementKind, EnumTable, FillStyle, ImageKind, SymbolEnum, TextAnchor,
};
pub use tree::{ElementTree, TreeError};
