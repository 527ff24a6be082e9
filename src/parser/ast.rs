//! Value trees produced by the grammar and the identifier resolver

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Value with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A literal as written, before identifiers are interpreted
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Object(Vec<(Spanned<String>, Spanned<RawValue>)>),
    Array(Vec<Spanned<RawValue>>),
    String(String),
    Number(f64),
    /// Bare or dotted identifier, e.g. `true` or `Blueprint.Anchor.TopLeft`
    Ident(String),
}

impl RawValue {
    /// Short description for error messages
    pub fn describe(&self) -> &'static str {
        match self {
            RawValue::Object(_) => "object literal",
            RawValue::Array(_) => "array literal",
            RawValue::String(_) => "string",
            RawValue::Number(_) => "number",
            RawValue::Ident(_) => "identifier",
        }
    }
}

/// A literal after identifier resolution
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Member of a known enum table
    Enum { table: &'static str, ordinal: i64 },
    Array(Vec<Value>),
    Object(Record),
}

/// Ordered key/value pairs of an object literal
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub entries: Vec<(String, Value)>,
}

impl Record {
    /// Value for `key`; when a key repeats, the last occurrence wins
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_duplicate_key_wins() {
        let record = Record {
            entries: vec![
                ("name".to_string(), Value::String("first".to_string())),
                ("name".to_string(), Value::String("second".to_string())),
            ],
        };
        assert_eq!(record.get("name"), Some(&Value::String("second".to_string())));
        assert_eq!(record.get("size"), None);
    }
}
