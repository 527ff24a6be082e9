//! Scalar formatting and identifier derivation for emitted code

use std::collections::{HashMap, HashSet};

/// Fallback identifier for names with no usable characters
const FALLBACK_IDENT: &str = "element";

const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Format a number without superfluous zeros: integers bare, everything else
/// rounded to at most four fractional digits. Non-finite values become `0`.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "0".to_string();
    }
    // Past 2^53 every f64 is already a whole number
    let rounded = if n.abs() < EXACT_INTEGER_LIMIT {
        (n * 10_000.0).round() / 10_000.0
    } else {
        n
    };
    if rounded == 0.0 {
        return "0".to_string();
    }
    if rounded.fract() == 0.0 {
        // f64 Display prints whole values in full, never in exponent form
        return format!("{}", rounded);
    }
    let text = format!("{:.4}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Double-quoted string literal
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Whether `s` lexes as a single plain identifier (no dots)
pub fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Lower-camel-case variable name derived from a display name
///
/// `"Main Menu"` -> `mainMenu`, `"play-button"` -> `playButton`.
/// Names starting with a digit get the fallback as prefix.
pub fn binding_identifier(name: &str) -> String {
    let words: Vec<&str> = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let mut ident = String::new();
    for (i, word) in words.iter().enumerate() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if i == 0 {
                ident.push(first.to_ascii_lowercase());
            } else {
                ident.push(first.to_ascii_uppercase());
            }
            ident.push_str(chars.as_str());
        }
    }

    if ident.is_empty() {
        return FALLBACK_IDENT.to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        let mut prefixed = FALLBACK_IDENT.to_string();
        prefixed.push_str(&ident);
        return prefixed;
    }
    ident
}

/// Collision-free identifiers for a batch of names, in order.
/// Repeats get a numeric suffix starting at 2.
pub fn binding_identifiers<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for name in names {
        let base = binding_identifier(name);
        let mut candidate = base.clone();
        let count = counts.entry(base.clone()).or_insert(1);
        while taken.contains(&candidate) {
            *count += 1;
            candidate = format!("{}{}", base, count);
        }
        taken.insert(candidate.clone());
        out.push(candidate);
    }
    out
}
