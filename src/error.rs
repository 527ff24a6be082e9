//! Error types for importing call-expression text

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::parser::lexer::Token;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Why the scanner rejected a piece of input
#[derive(Error, Debug, Clone, PartialEq, Default)]
pub enum LexErrorKind {
    #[default]
    #[error("unexpected character")]
    UnexpectedCharacter,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("invalid number literal")]
    InvalidNumber,
    #[error("unterminated block comment")]
    UnterminatedComment,
}

/// Broad failure category of an [`ImportError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing call marker, unbalanced delimiters, bad argument shapes
    Structural,
    /// Unterminated strings, malformed numbers, stray characters
    Lexical,
    /// Unknown enum members, unsupported qualified identifiers
    Semantic,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    #[error("Structural error at {span:?}: {message}")]
    Structural {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    #[error("Lexical error at {span:?}: {kind}")]
    Lexical { span: Span, kind: LexErrorKind },

    #[error("Semantic error at {span:?}: {message}")]
    Semantic { span: Span, message: String },
}

impl ImportError {
    pub fn structural(span: Span, message: impl Into<String>) -> Self {
        Self::Structural {
            span,
            message: message.into(),
            expected: Vec::new(),
        }
    }

    pub fn lexical(span: Span, kind: LexErrorKind) -> Self {
        Self::Lexical { span, kind }
    }

    pub fn semantic(span: Span, message: impl Into<String>) -> Self {
        Self::Semantic {
            span,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Structural { .. } => ErrorCategory::Structural,
            Self::Lexical { .. } => ErrorCategory::Lexical,
            Self::Semantic { .. } => ErrorCategory::Semantic,
        }
    }

    /// Byte range of the offending input
    pub fn span(&self) -> &Span {
        match self {
            Self::Structural { span, .. }
            | Self::Lexical { span, .. }
            | Self::Semantic { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let (message, note) = match self {
            Self::Structural {
                message, expected, ..
            } => {
                let note = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };
                (message.clone(), note)
            }
            Self::Lexical { kind, .. } => (kind.to_string(), String::new()),
            Self::Semantic { message, .. } => (message.clone(), String::new()),
        };

        let span = self.span().clone();
        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(format!("{}{}", message, note))
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for ImportError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => match found {
                Some(tok) => format!("Unexpected {}", format_token(tok)),
                None => "Unexpected end of call arguments".to_string(),
            },
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of input".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        ImportError::Structural {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    match tok {
        Token::Ident(s) => format!("identifier '{}'", s),
        Token::Str(s) => format!("string \"{}\"", s),
        Token::Number(n) => format!("number {}", n),
        Token::BraceOpen => "'{'".to_string(),
        Token::BraceClose => "'}'".to_string(),
        Token::BracketOpen => "'['".to_string(),
        Token::BracketClose => "']'".to_string(),
        Token::Comma => "','".to_string(),
        Token::Colon => "':'".to_string(),
        Token::LineComment | Token::BlockComment => "comment".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            ImportError::structural(0..1, "x").category(),
            ErrorCategory::Structural
        );
        assert_eq!(
            ImportError::lexical(0..1, LexErrorKind::InvalidNumber).category(),
            ErrorCategory::Lexical
        );
        assert_eq!(
            ImportError::semantic(0..1, "x").category(),
            ErrorCategory::Semantic
        );
    }

    #[test]
    fn test_display_includes_position() {
        let err = ImportError::lexical(12..13, LexErrorKind::UnexpectedCharacter);
        let text = err.to_string();
        assert!(text.contains("12..13"));
        assert!(text.contains("unexpected character"));
    }

    #[test]
    fn test_format_with_source() {
        let source = "Blueprint.Build({ name: @ })";
        let err = ImportError::lexical(24..25, LexErrorKind::UnexpectedCharacter);
        let report = err.format(source, "input.lua");
        assert!(report.contains("unexpected character"));
        assert!(report.contains("input.lua"));
    }
}
