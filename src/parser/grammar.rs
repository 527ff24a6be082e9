//! Recursive-descent grammar for call arguments, using chumsky
//!
//! ```text
//! arguments := value ("," value)*
//! value     := object | array | STRING | NUMBER | IDENT
//! object    := "{" (IDENT ":" value ("," IDENT ":" value)*)? "}"
//! array     := "[" (value ("," value)*)? "]"
//! ```
//!
//! Trailing commas are not accepted.

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::ImportError;
use crate::parser::ast::{RawValue, Span, Spanned};
use crate::parser::lexer::Token;

/// Parse the token stream of one call's argument text. `end` is the byte
/// offset just past the argument text, used to locate end-of-input errors.
pub fn parse_arguments(
    tokens: Vec<(Token, Span)>,
    end: usize,
) -> Result<Vec<Spanned<RawValue>>, ImportError> {
    let token_iter = tokens
        .into_iter()
        .map(|(tok, span)| (tok, SimpleSpan::from(span)));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((end..end).into(), |(t, s): (_, _)| (t, s));

    arguments_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| match errs.into_iter().next() {
            Some(err) => err.into(),
            None => ImportError::structural(end..end, "malformed call arguments"),
        })
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn arguments_parser<'a, I>(
) -> impl Parser<'a, I, Vec<Spanned<RawValue>>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let value = recursive(|value| {
        let key = select! {
            Token::Ident(s) => s,
        }
        .map_with(|s, e| Spanned::new(s, span_range(&e.span())));

        let member = key.then_ignore(just(Token::Colon)).then(value.clone());

        let object = member
            .separated_by(just(Token::Comma))
            .collect::<Vec<_>>()
            .delimited_by(just(Token::BraceOpen), just(Token::BraceClose))
            .map(RawValue::Object);

        let array = value
            .separated_by(just(Token::Comma))
            .collect::<Vec<_>>()
            .delimited_by(just(Token::BracketOpen), just(Token::BracketClose))
            .map(RawValue::Array);

        let literal = select! {
            Token::Str(s) => RawValue::String(s),
            Token::Number(n) => RawValue::Number(n),
            Token::Ident(s) => RawValue::Ident(s),
        };

        choice((object, array, literal)).map_with(|v, e| Spanned::new(v, span_range(&e.span())))
    });

    value
        .separated_by(just(Token::Comma))
        .at_least(1)
        .collect::<Vec<_>>()
        .then_ignore(end())
}
