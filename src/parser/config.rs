//! Configuration for importing code

use crate::model::NodeDefaults;
use crate::serializer::StringTable;

/// Configuration options for the import pipeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportConfig {
    /// Default table used to backfill fields missing from the input
    pub defaults: NodeDefaults,

    /// When set, `Blueprint.stringkeys.<key>` labels resolve to the table's text
    pub string_table: Option<StringTable>,
}

impl ImportConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default table
    pub fn with_defaults(mut self, defaults: NodeDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Resolve localization references against `table`
    pub fn with_string_table(mut self, table: StringTable) -> Self {
        self.string_table = Some(table);
        self
    }
}
