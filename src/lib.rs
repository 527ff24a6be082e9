//! UI Blueprint - widget trees with anchor layout and a code round trip
//!
//! This library provides the element tree model, an anchor geometry
//! resolver, a snapping engine, and a serializer/parser pair for the
//! `Blueprint.Build(...)` call-expression encoding.
//!
//! # Example
//!
//! ```rust
//! use ui_blueprint::{export, import, ElementKind, ElementTree, ExportConfig};
//!
//! let mut tree = ElementTree::new();
//! tree.create(ElementKind::Button, None).unwrap();
//!
//! let exported = export(&tree, &ExportConfig::default());
//! assert!(exported.code.contains("Blueprint.Build("));
//!
//! let parsed = import(&exported.code).unwrap();
//! assert_eq!(parsed.len(), 1);
//! ```

pub mod error;
pub mod geometry;
pub mod model;
pub mod parser;
pub mod serializer;
pub mod snap;

pub use error::{ErrorCategory, ImportError};
pub use geometry::{compute_all_bounds, CanvasConfig, NodeBounds, Point, Rect};
pub use model::{Anchor, ElementKind, ElementTree, Node, NodeDefaults, NodeId, TreeError};
pub use parser::{parse, parse_with_config, ImportConfig};
pub use serializer::{Export, SerializerConfig, StringTable};
pub use snap::{snap, snap_move, SnapConfig, SnapResult};

use tracing::info;

/// Configuration for the export pipeline
#[derive(Debug, Clone, Default)]
pub struct ExportConfig {
    /// Code layout options
    pub serializer: SerializerConfig,
    /// Existing localization table used to emit label references
    pub localization: StringTable,
    /// Emit a single declaration with one argument per root
    pub combined: bool,
}

impl ExportConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the serializer configuration
    pub fn with_serializer(mut self, config: SerializerConfig) -> Self {
        self.serializer = config;
        self
    }

    /// Set the localization table used for label references
    pub fn with_localization(mut self, table: StringTable) -> Self {
        self.localization = table;
        self
    }

    /// Enable or disable the combined single-declaration form
    pub fn with_combined(mut self, combined: bool) -> Self {
        self.combined = combined;
        self
    }
}

/// How an imported tree is adopted by an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Discard the current content
    #[default]
    Replace,
    /// Add the imported roots after the existing ones
    Append,
}

/// Export a tree to code plus its string table
///
/// # Example
///
/// ```rust
/// use ui_blueprint::{export, ElementKind, ElementTree, ExportConfig};
///
/// let mut tree = ElementTree::new();
/// let root = tree.create(ElementKind::Container, None).unwrap();
/// tree.create(ElementKind::Text, Some(root)).unwrap();
///
/// let exported = export(&tree, &ExportConfig::new().with_combined(true));
/// assert!(exported.code.starts_with("local layout = Blueprint.Build("));
/// assert_eq!(exported.strings.get("Text"), Some("Label"));
/// ```
pub fn export(tree: &ElementTree, config: &ExportConfig) -> Export {
    if config.combined {
        Export {
            code: serializer::serialize_combined(tree, &config.localization, &config.serializer),
            strings: serializer::collect_strings(tree),
        }
    } else {
        serializer::export(tree, &config.localization, &config.serializer)
    }
}

/// Parse code into a new tree with default configuration
pub fn import(source: &str) -> Result<ElementTree, ImportError> {
    parse(source)
}

/// Parse code and adopt the result into `tree`
///
/// The tree is only touched once the whole input has parsed; on error it is
/// left exactly as it was. Returns the ids of the adopted roots.
pub fn import_into(
    tree: &mut ElementTree,
    source: &str,
    mode: ImportMode,
    config: &ImportConfig,
) -> Result<Vec<NodeId>, ImportError> {
    let parsed = parse_with_config(source, config)?;
    let roots = match mode {
        ImportMode::Replace => {
            tree.replace_with(parsed);
            tree.roots().to_vec()
        }
        ImportMode::Append => tree.append(parsed),
    };
    info!(?mode, roots = roots.len(), nodes = tree.len(), "imported tree");
    Ok(roots)
}
