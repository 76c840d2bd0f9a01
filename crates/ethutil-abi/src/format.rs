//! Human-readable and JSON rendering of values and encoded data

use std::fmt;

use serde_json::{Map, Value};

use crate::encode::EncodedCallData;
use crate::types::{Token, WORD};

/// Display form: decimal integers, lowercase `0x` hex for addresses and
/// bytes, raw strings, arrays as `[a b c]`, tuples as `(a, b, c)`
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Address(addr) => write!(f, "{}", addr.to_hex()),
            Token::Uint(value, _) => write!(f, "{}", value),
            Token::Int(value, _) => write!(f, "{}", value),
            Token::Bool(b) => write!(f, "{}", b),
            Token::Bytes(data) | Token::FixedBytes(data) => write!(f, "0x{}", hex::encode(data)),
            Token::String(s) => f.write_str(s),
            Token::Array(items) => write_joined(f, "[", " ", "]", items),
            Token::Tuple(items) => write_joined(f, "(", ", ", ")", items),
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    separator: &str,
    close: &str,
    items: &[Token],
) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(close)
}

/// One `name = value` line per decoded return value
pub fn format_outputs(values: &[(String, Token)]) -> Vec<String> {
    values
        .iter()
        .map(|(name, token)| format!("{} = {}", name, token))
        .collect()
}

/// Indexed 32-byte words as `[i]:  0x<64 hex>`.
///
/// A trailing partial word is shown with only the bytes present.
pub fn dump_words(data: &[u8]) -> Vec<String> {
    data.chunks(WORD)
        .enumerate()
        .map(|(i, chunk)| format!("[{}]:  0x{}", i, hex::encode(chunk)))
        .collect()
}

/// `MethodID: 0x<8 hex>` when a selector is present, then the body words
pub fn dump_call_data(call: &EncodedCallData) -> Vec<String> {
    let mut lines = Vec::with_capacity(call.body.len() / WORD + 1);
    if let Some(selector) = call.selector {
        lines.push(format!("MethodID: 0x{}", hex::encode(selector)));
    }
    lines.extend(dump_words(&call.body));
    lines
}

/// JSON form of a value.
///
/// Integers become decimal strings so 256-bit values survive; tuples
/// become objects keyed `Field0`, `Field1`, ...
pub fn token_to_json(token: &Token) -> Value {
    match token {
        Token::Bool(b) => Value::Bool(*b),
        Token::Array(items) => Value::Array(items.iter().map(token_to_json).collect()),
        Token::Tuple(items) => Value::Object(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| (format!("Field{}", i), token_to_json(item)))
                .collect(),
        ),
        other => Value::String(other.to_string()),
    }
}

/// JSON object of named return values.
///
/// A repeated name falls back to the positional `retN` key.
pub fn outputs_to_json(values: &[(String, Token)]) -> Value {
    let mut map = Map::with_capacity(values.len());
    for (i, (name, token)) in values.iter().enumerate() {
        let mut key = if map.contains_key(name) {
            format!("ret{}", i)
        } else {
            name.clone()
        };
        while map.contains_key(&key) {
            key.push('_');
        }
        map.insert(key, token_to_json(token));
    }
    Value::Object(map)
}
