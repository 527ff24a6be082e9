//! Tokenizer for call-argument text using logos

use logos::{Lexer, Logos};

use crate::error::{ImportError, LexErrorKind};

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // Delimiters
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,

    // Literals
    #[token("\"", |lex| lex_string(lex, '"'))]
    #[token("'", |lex| lex_string(lex, '\''))]
    Str(String),

    // A lone or misplaced minus still lexes here so it reports as a bad number
    #[regex(r"-[0-9]*(\.[0-9]*)?|[0-9]+(\.[0-9]*)?", lex_number)]
    Number(f64),

    // Dots are part of identifiers so qualified names are a single token
    #[regex(r"[A-Za-z_][A-Za-z0-9_.]*", |lex| lex.slice().to_string())]
    Ident(String),

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", logos::skip)]
    BlockComment,
}

/// Scan a quoted string whose opening quote was just consumed
fn lex_string(lex: &mut Lexer<'_, Token>, quote: char) -> Result<String, LexErrorKind> {
    let remainder = lex.remainder();
    let mut out = String::new();
    let mut chars = remainder.char_indices();

    while let Some((i, c)) = chars.next() {
        if c == quote {
            lex.bump(i + c.len_utf8());
            return Ok(out);
        }
        if c == '\\' {
            match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, 'r')) => out.push('\r'),
                // \\, \", \' and unknown escapes keep the escaped character
                Some((_, other)) => out.push(other),
                None => break,
            }
        } else {
            out.push(c);
        }
    }

    lex.bump(remainder.len());
    Err(LexErrorKind::UnterminatedString)
}

/// Optional minus, integer part, optional fractional part with digits
fn lex_number(lex: &mut Lexer<'_, Token>) -> Result<f64, LexErrorKind> {
    let slice = lex.slice();
    let unsigned = slice.strip_prefix('-').unwrap_or(slice);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    if integer.is_empty() || fraction.is_some_and(str::is_empty) {
        return Err(LexErrorKind::InvalidNumber);
    }
    slice.parse().map_err(|_| LexErrorKind::InvalidNumber)
}

/// Tokenize `input`, shifting spans by `base` so they point into the full
/// source text. The first unrecognized input is a lexical error.
pub fn tokenize(input: &str, base: usize) -> Result<Vec<(Token, Span)>, ImportError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let span = base + span.start..base + span.end;
        match result {
            Ok(tok) => tokens.push((tok, span)),
            Err(kind) => return Err(ImportError::lexical(span, kind)),
        }
    }
    Ok(tokens)
}
