//! Identifier resolution: turns raw literals into typed values
//!
//! - `true` / `false` / `null` become literals
//! - `Blueprint.<Enum>.<Member>` becomes an enum ordinal
//! - `Blueprint.stringkeys.<key>` becomes a string
//! - other identifiers become plain strings

use crate::error::ImportError;
use crate::model::symbols::{enum_table, NAMESPACE, STRING_KEYS};
use crate::parser::ast::{RawValue, Record, Spanned, Value};
use crate::serializer::StringTable;

/// Resolve one raw value. With a string table, localization accessors whose
/// key is present resolve to the table's text; otherwise they stay opaque.
pub fn resolve(
    raw: &Spanned<RawValue>,
    strings: Option<&StringTable>,
) -> Result<Value, ImportError> {
    match &raw.node {
        RawValue::Object(members) => {
            let mut record = Record::default();
            for (key, value) in members {
                record
                    .entries
                    .push((key.node.clone(), resolve(value, strings)?));
            }
            Ok(Value::Object(record))
        }
        RawValue::Array(items) => items
            .iter()
            .map(|item| resolve(item, strings))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        RawValue::String(s) => Ok(Value::String(s.clone())),
        RawValue::Number(n) => Ok(Value::Number(*n)),
        RawValue::Ident(ident) => resolve_ident(ident, raw, strings),
    }
}

/// Resolve a top-level call argument, which must be an object literal
pub fn resolve_record(
    raw: &Spanned<RawValue>,
    index: usize,
    strings: Option<&StringTable>,
) -> Result<Record, ImportError> {
    if !matches!(raw.node, RawValue::Object(_)) {
        return Err(ImportError::structural(
            raw.span.clone(),
            format!(
                "call argument {} must be an object literal, found {}",
                index + 1,
                raw.node.describe()
            ),
        ));
    }
    match resolve(raw, strings)? {
        Value::Object(record) => Ok(record),
        _ => Err(ImportError::structural(
            raw.span.clone(),
            "call argument did not resolve to an object",
        )),
    }
}

fn resolve_ident(
    ident: &str,
    raw: &Spanned<RawValue>,
    strings: Option<&StringTable>,
) -> Result<Value, ImportError> {
    match ident {
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        "null" | "nil" => return Ok(Value::Null),
        _ => {}
    }

    let Some(qualified) = ident
        .strip_prefix(NAMESPACE)
        .and_then(|rest| rest.strip_prefix('.'))
    else {
        return Ok(Value::String(ident.to_string()));
    };

    let (group, member) = qualified.split_once('.').unwrap_or((qualified, ""));

    if group == STRING_KEYS && !member.is_empty() {
        let text = strings
            .and_then(|table| table.get(member))
            .map(str::to_string)
            .unwrap_or_else(|| ident.to_string());
        return Ok(Value::String(text));
    }

    if let Some(table) = enum_table(group) {
        if member.is_empty() || member.contains('.') {
            return Err(ImportError::semantic(
                raw.span.clone(),
                format!("malformed enum reference '{}'", ident),
            ));
        }
        return match table.ordinal_of(member) {
            Some(ordinal) => Ok(Value::Enum {
                table: table.name,
                ordinal,
            }),
            None => Err(ImportError::semantic(
                raw.span.clone(),
                format!("unknown {} member '{}'", table.name, member),
            )),
        };
    }

    Err(ImportError::semantic(
        raw.span.clone(),
        format!("unsupported identifier '{}'", ident),
    ))
}
