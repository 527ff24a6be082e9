//! Parser for `Blueprint.Build(...)` call expressions
//!
//! The pipeline runs in stages, each pure over its input:
//! call extraction, tokenization, grammar, identifier resolution and
//! normalization against the default table.

pub mod ast;
pub mod config;
pub mod extract;
mod grammar;
pub mod lexer;
pub mod normalize;
pub mod resolve;

pub use ast::{RawValue, Record, Span, Spanned, Value};
pub use config::ImportConfig;
pub use extract::{extract_calls, CallPayload};
pub use lexer::{tokenize, Token};

use tracing::{debug, trace};

use crate::error::ImportError;
use crate::model::ElementTree;

/// Parse every call in `input` into a tree using the default configuration
pub fn parse(input: &str) -> Result<ElementTree, ImportError> {
    parse_with_config(input, &ImportConfig::default())
}

/// Parse every call in `input` into a tree. Each object argument of each
/// call becomes one root, in order of appearance.
pub fn parse_with_config(input: &str, config: &ImportConfig) -> Result<ElementTree, ImportError> {
    let records = parse_records(input, config)?;
    let tree = normalize::normalize(&records, &config.defaults)?;
    debug!(roots = tree.roots().len(), nodes = tree.len(), "parsed tree");
    Ok(tree)
}

/// Run the pipeline up to identifier resolution
pub fn parse_records(input: &str, config: &ImportConfig) -> Result<Vec<Record>, ImportError> {
    let calls = extract_calls(input)?;
    debug!(calls = calls.len(), "extracted calls");

    let mut records = Vec::new();
    for call in calls {
        let tokens = tokenize(call.arguments, call.offset)?;
        trace!(tokens = tokens.len(), offset = call.offset, "tokenized call");

        let arguments = grammar::parse_arguments(tokens, call.offset + call.arguments.len())?;
        for (index, argument) in arguments.iter().enumerate() {
            records.push(resolve::resolve_record(
                argument,
                index,
                config.string_table.as_ref(),
            )?);
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::model::{Anchor, ElementKind};

    #[test]
    fn test_parse_minimal() {
        let tree = parse("local ui = Blueprint.Build({ name: \"Root\" })").unwrap();
        assert_eq!(tree.len(), 1);
        let node = tree.get(tree.roots()[0]).unwrap();
        assert_eq!(node.name, "Root");
        assert_eq!(node.kind(), ElementKind::Container);
    }

    #[test]
    fn test_parse_multiple_arguments_and_calls() {
        let input = r#"
            local a = Blueprint.Build({ name: "A" }, { name: "B" })
            local c = Blueprint.Build({ name: "C", anchor: Blueprint.Anchor.BottomRight })
        "#;
        let tree = parse(input).unwrap();
        let names: Vec<_> = tree
            .roots()
            .iter()
            .map(|id| tree.get(*id).unwrap().name.clone())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(
            tree.get(tree.roots()[2]).unwrap().anchor,
            Anchor::BottomRight
        );
    }

    #[test]
    fn test_error_spans_point_into_full_input() {
        let input = "x = Blueprint.Build({ name: @ })";
        let err = parse(input).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Lexical);
        assert_eq!(&input[err.span().clone()], "@");
    }

    #[test]
    fn test_trailing_comma_rejected() {
        let err = parse("Blueprint.Build({ name: \"A\", })").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Structural);
    }

    #[test]
    fn test_missing_comma_rejected() {
        let err = parse("Blueprint.Build({ name: \"A\" size: [1, 2] })").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Structural);
    }

    #[test]
    fn test_non_object_argument_rejected() {
        let err = parse("Blueprint.Build({ name: \"A\" }, 5)").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Structural);
        assert!(err.to_string().contains("call argument 2"));
    }

    #[test]
    fn test_unknown_enum_member_rejected() {
        let err = parse("Blueprint.Build({ anchor: Blueprint.Anchor.Left })").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Semantic);
    }
}
