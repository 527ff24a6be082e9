//! Element tree to code serialization
//!
//! - `writer`: declarations and object literals
//! - `format`: numbers, strings, binding identifiers
//! - `strings`: the localization string table
//! - `config`: output options

pub mod config;
pub mod format;
pub mod strings;
pub mod writer;

pub use config::SerializerConfig;
pub use format::{binding_identifier, binding_identifiers, format_number, quote_string};
pub use strings::{collect_strings, string_key, StringTable};
pub use writer::{serialize, serialize_combined};

use serde::Serialize;
use tracing::debug;

use crate::model::ElementTree;

/// Generated code plus the string table collected from the same tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Export {
    pub code: String,
    pub strings: StringTable,
}

/// Serialize `tree` per root and collect its strings in one call
pub fn export(
    tree: &ElementTree,
    localization: &StringTable,
    config: &SerializerConfig,
) -> Export {
    let code = serialize(tree, localization, config);
    let strings = collect_strings(tree);
    debug!(
        roots = tree.roots().len(),
        nodes = tree.len(),
        strings = strings.len(),
        "exported tree"
    );
    Export { code, strings }
}
