//! Literal emission helpers.

use dm_parser::LiteralValue;
use std::fmt::Write as _;

/// Double-quoted JavaScript string literal for `value`.
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub(crate) fn literal_text(value: &LiteralValue) -> String {
    match value {
        LiteralValue::String(s) => quote_string(s),
        LiteralValue::Number(raw) => raw.clone(),
        LiteralValue::Boolean(b) => b.to_string(),
        LiteralValue::Null => "null".to_string(),
    }
}
