//! Configuration for code output

/// Configuration options for the serializer
#[derive(Debug, Clone, PartialEq)]
pub struct SerializerConfig {
    /// One level of indentation
    pub indent: String,

    /// Keyword that introduces each declaration
    pub binding_keyword: String,

    /// Variable name of the combined declaration
    pub combined_binding: String,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            binding_keyword: "local".to_string(),
            combined_binding: "layout".to_string(),
        }
    }
}

impl SerializerConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation unit
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Set the declaration keyword
    pub fn with_binding_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.binding_keyword = keyword.into();
        self
    }

    /// Set the variable name used by the combined form
    pub fn with_combined_binding(mut self, name: impl Into<String>) -> Self {
        self.combined_binding = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SerializerConfig::default();
        assert_eq!(config.indent, "    ");
        assert_eq!(config.binding_keyword, "local");
        assert_eq!(config.combined_binding, "layout");
    }

    #[test]
    fn test_builder_pattern() {
        let config = SerializerConfig::new()
            .with_indent("\t")
            .with_binding_keyword("let")
            .with_combined_binding("ui");
        assert_eq!(config.indent, "\t");
        assert_eq!(config.binding_keyword, "let");
        assert_eq!(config.combined_binding, "ui");
    }
}
