//! Locate `Blueprint.Build(...)` calls inside arbitrary text
//!
//! Parentheses are balanced from the call's opening `(`, ignoring any that
//! appear inside string literals or comments. A marker whose call cannot be
//! balanced is skipped when a later marker yields a complete call, so text
//! such as `print("Blueprint.Build(")` ahead of the real call is tolerated.

use crate::error::{ImportError, LexErrorKind};
use crate::model::symbols::CALL_MARKER;

/// Argument text of one call: everything between its parentheses
#[derive(Debug, Clone, PartialEq)]
pub struct CallPayload<'a> {
    pub arguments: &'a str,
    /// Byte offset of `arguments` in the full input
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ScanState {
    Code,
    /// Quote character and the byte offset of the opening quote
    Quoted(u8, usize),
    LineComment,
    /// Byte offset of the opening `/*`
    BlockComment(usize),
}

/// Extract every call payload in order of appearance.
/// Finding no call at all is a structural error, and so is a call that
/// cannot be balanced unless a later call succeeds.
pub fn extract_calls(input: &str) -> Result<Vec<CallPayload<'_>>, ImportError> {
    let mut calls = Vec::new();
    let mut pending: Option<ImportError> = None;
    let mut cursor = 0;

    while let Some(found) = input[cursor..].find(CALL_MARKER) {
        let marker_start = cursor + found;
        let marker_end = marker_start + CALL_MARKER.len();
        cursor = marker_end;

        if !is_boundary(input, marker_start, marker_end) {
            continue;
        }

        let rest = &input[marker_end..];
        let trimmed = rest.trim_start();
        if !trimmed.starts_with('(') {
            continue;
        }
        let open = marker_end + (rest.len() - trimmed.len());

        let close = match find_closing_paren(input, marker_start, open) {
            Ok(close) => close,
            Err(err) => {
                pending.get_or_insert(err);
                continue;
            }
        };

        pending = None;
        calls.push(CallPayload {
            arguments: &input[open + 1..close],
            offset: open + 1,
        });
        cursor = close + 1;
    }

    if let Some(err) = pending {
        return Err(err);
    }
    if calls.is_empty() {
        return Err(ImportError::structural(
            0..0,
            format!("no {}(...) call found in input", CALL_MARKER),
        ));
    }
    Ok(calls)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// The marker must not be part of a longer identifier
fn is_boundary(input: &str, start: usize, end: usize) -> bool {
    let before = input[..start].chars().next_back();
    let after = input[end..].chars().next();
    !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
}

/// Index of the `)` matching the `(` at `open`. Input that ends inside a
/// string or block comment is a lexical error at its opening delimiter;
/// input that ends with parentheses still open is a structural error.
fn find_closing_paren(
    input: &str,
    marker_start: usize,
    open: usize,
) -> Result<usize, ImportError> {
    let bytes = input.as_bytes();
    let mut state = ScanState::Code;
    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();
        match state {
            ScanState::Code => match b {
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(i);
                    }
                }
                b'"' | b'\'' => state = ScanState::Quoted(b, i),
                b'/' if next == Some(b'/') => {
                    state = ScanState::LineComment;
                    i += 1;
                }
                b'/' if next == Some(b'*') => {
                    state = ScanState::BlockComment(i);
                    i += 1;
                }
                _ => {}
            },
            ScanState::Quoted(quote, _) => {
                if b == b'\\' {
                    i += 1;
                } else if b == quote {
                    state = ScanState::Code;
                }
            }
            ScanState::LineComment => {
                if b == b'\n' {
                    state = ScanState::Code;
                }
            }
            ScanState::BlockComment(_) => {
                if b == b'*' && next == Some(b'/') {
                    state = ScanState::Code;
                    i += 1;
                }
            }
        }
        i += 1;
    }

    Err(match state {
        ScanState::Quoted(_, start) => {
            ImportError::lexical(start..input.len(), LexErrorKind::UnterminatedString)
        }
        ScanState::BlockComment(start) => {
            ImportError::lexical(start..input.len(), LexErrorKind::UnterminatedComment)
        }
        ScanState::Code | ScanState::LineComment => ImportError::structural(
            marker_start..input.len(),
            format!("unbalanced parentheses in {} call", CALL_MARKER),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    #[test]
    fn test_single_call() {
        let input = "local ui = Blueprint.Build({ a: 1 })";
        let calls = extract_calls(input).unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].arguments, "{ a: 1 }");
        assert_eq!(&input[calls[0].offset..calls[0].offset + 8], "{ a: 1 }");
    }

    #[test]
    fn test_multiple_calls_in_order() {
        let input = "a = Blueprint.Build({}) -- gap\nb = Blueprint.Build ({ x: 2 })";
        let calls = extract_calls(input).unwrap();
        assert_eq!(
            calls.iter().map(|c| c.arguments).collect::<Vec<_>>(),
            vec!["{}", "{ x: 2 }"]
        );
    }

    #[test]
    fn test_parens_in_strings_and_comments_ignored() {
        let input = r#"Blueprint.Build({ name: "a)b", note: 'c(' /* ) */ // )
        })"#;
        let calls = extract_calls(input).unwrap();
        assert!(calls[0].arguments.ends_with("\n        }"));
    }

    #[test]
    fn test_escaped_quote_in_string() {
        let input = r#"Blueprint.Build({ name: "say \")\"" })"#;
        let calls = extract_calls(input).unwrap();
        assert_eq!(calls[0].arguments, r#"{ name: "say \")\"" }"#);
    }

    #[test]
    fn test_missing_marker() {
        let err = extract_calls("print('hello')").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Structural);
    }

    #[test]
    fn test_marker_inside_longer_name_is_ignored() {
        assert!(extract_calls("MyBlueprint.Builder({})").is_err());
    }

    #[test]
    fn test_unterminated_string_is_lexical() {
        let input = "Blueprint.Build({ name: \"open })";
        let err = extract_calls(input).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Lexical);
        assert_eq!(err.span(), &(24..input.len()));
    }

    #[test]
    fn test_unterminated_block_comment_is_lexical() {
        let input = "Blueprint.Build({ /* note })";
        match extract_calls(input) {
            Err(ImportError::Lexical { span, kind }) => {
                assert_eq!(kind, LexErrorKind::UnterminatedComment);
                assert_eq!(span.start, 18);
            }
            other => panic!("expected lexical error, got {:?}", other),
        }
    }

    #[test]
    fn test_marker_in_host_string_skipped() {
        let input = r#"print("call Blueprint.Build(") local ui = Blueprint.Build({ name: "A" })"#;
        let calls = extract_calls(input).unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].arguments, r#"{ name: "A" }"#);
    }

    #[test]
    fn test_broken_call_after_good_call_still_fails() {
        let input = "Blueprint.Build({ a: 1 }) Blueprint.Build({ b: (2 }";
        let err = extract_calls(input).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Structural);
        assert_eq!(err.span().start, 26);
    }

    #[test]
    fn test_unbalanced_call() {
        let err = extract_calls("x = Blueprint.Build({ a: (1 }").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Structural);
        assert_eq!(err.span().start, 4);
    }
}
