//! Solidity function signature parsing

use std::borrow::Cow;

use ethutil_crypto::keccak256;

use crate::error::AbiError;
use crate::split::{matching_close, split_top_level, strip_enclosing};
use crate::types::{ParamType, MAX_NESTING_DEPTH};

/// Words in a parameter declaration that are neither type nor name
const MODIFIERS: &[&str] = &["memory", "calldata", "storage", "payable", "indexed"];

/// Visibility and mutability words allowed around a `returns` clause
const QUALIFIERS: &[&str] = &[
    "external",
    "public",
    "internal",
    "private",
    "view",
    "pure",
    "payable",
    "nonpayable",
    "constant",
    "virtual",
    "override",
];

/// A parsed function signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    /// Function name, empty for a bare parameter list
    pub name: String,
    /// Input parameter types in order
    pub params: Vec<ParamType>,
    /// Named return types in order
    pub returns: Vec<(String, ParamType)>,
}

impl FunctionSignature {
    /// Parse a human-written signature
    pub fn parse(input: &str) -> Result<Self, AbiError> {
        parse_signature(input)
    }

    /// Canonical `name(type1,type2)` text
    pub fn canonical(&self) -> String {
        let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        format!("{}({})", self.name, params.join(","))
    }

    /// First four bytes of keccak256 over the canonical text.
    ///
    /// `None` for a bare parameter list.
    pub fn selector(&self) -> Option<[u8; 4]> {
        if self.name.is_empty() {
            None
        } else {
            Some(function_selector(&self.canonical()))
        }
    }

    /// Return types without their names
    pub fn return_types(&self) -> Vec<ParamType> {
        self.returns.iter().map(|(_, ty)| ty.clone()).collect()
    }
}

/// Compute function selector from canonical signature text
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash.as_bytes()[..4]);
    selector
}

/// Strip a leading `function` keyword
fn strip_function_keyword(input: &str) -> &str {
    let text = input.trim();
    match text.strip_prefix("function") {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => text,
    }
}

/// Function name portion of a signature: text before `(`, keyword removed
pub fn extract_function_name(input: &str) -> &str {
    let text = strip_function_keyword(input);
    match text.find('(') {
        Some(open) => text[..open].trim(),
        None => text,
    }
}

/// Parse a signature such as
/// `function transfer(address to, uint256 amount) external returns (bool)`.
///
/// Data-location and visibility keywords are ignored, parameter names are
/// optional, and `uint`/`int` normalize to their 256-bit forms. Unnamed
/// return values are called `ret0`, `ret1`, ...
pub fn parse_signature(input: &str) -> Result<FunctionSignature, AbiError> {
    let grammar = |reason: String| AbiError::Grammar {
        input: input.to_string(),
        reason,
    };
    let text = strip_function_keyword(input);

    let open = match text.find('(') {
        Some(open) => open,
        None => {
            if text.contains(')') {
                return Err(grammar("unbalanced parentheses".to_string()));
            }
            validate_name(text).map_err(grammar)?;
            return Ok(FunctionSignature {
                name: text.to_string(),
                params: Vec::new(),
                returns: Vec::new(),
            });
        }
    };

    let name = text[..open].trim();
    validate_name(name).map_err(grammar)?;
    let close = matching_close(text, open)
        .ok_or_else(|| grammar("unbalanced parentheses".to_string()))?;

    let params = parse_param_list(&text[open..=close], 0)
        .map_err(grammar)?
        .into_iter()
        .map(|(ty, _)| ty)
        .collect();
    let returns = parse_returns(&text[close + 1..]).map_err(grammar)?;

    let signature = FunctionSignature {
        name: name.to_string(),
        params,
        returns,
    };
    tracing::debug!(
        canonical = %signature.canonical(),
        returns = signature.returns.len(),
        "parsed function signature"
    );
    Ok(signature)
}

/// Parse a single type string such as `uint256[2]` or `(address,bytes)[]`
pub fn parse_type(input: &str) -> Result<ParamType, AbiError> {
    parse_type_at(input, 0).map_err(|reason| AbiError::Grammar {
        input: input.to_string(),
        reason,
    })
}

fn validate_name(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        None => true,
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_' || first == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
    };
    if valid {
        Ok(())
    } else {
        Err(format!("invalid function name `{}`", name))
    }
}

/// Locate `returns` as a standalone word in the text after the parameter list
fn find_returns_keyword(rest: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(found) = rest[from..].find("returns") {
        let start = from + found;
        let end = start + "returns".len();
        let before_ok = rest[..start]
            .chars()
            .next_back()
            .map_or(true, |c| c.is_whitespace() || c == ')');
        let after_ok = rest[end..]
            .chars()
            .next()
            .map_or(true, |c| c.is_whitespace() || c == '(');
        if before_ok && after_ok {
            return Some(end);
        }
        from = end;
    }
    None
}

/// Reject anything other than qualifier keywords
fn check_qualifiers(text: &str) -> Result<(), String> {
    match text.split_whitespace().find(|word| !QUALIFIERS.contains(word)) {
        Some(word) => Err(format!("unexpected `{}` after parameter list", word)),
        None => Ok(()),
    }
}

fn parse_returns(rest: &str) -> Result<Vec<(String, ParamType)>, String> {
    let end = match find_returns_keyword(rest) {
        Some(end) => end,
        None => {
            check_qualifiers(rest)?;
            return Ok(Vec::new());
        }
    };
    check_qualifiers(&rest[..end - "returns".len()])?;
    let list = rest[end..].trim_start();
    if !list.starts_with('(') {
        return Err("expected `(` after returns".to_string());
    }
    let close = matching_close(list, 0).ok_or("unbalanced parentheses in returns")?;
    check_qualifiers(&list[close + 1..])?;

    let returns = parse_param_list(&list[..=close], 0)?
        .into_iter()
        .enumerate()
        .map(|(i, (ty, name))| (name.unwrap_or_else(|| format!("ret{}", i)), ty))
        .collect();
    Ok(returns)
}

/// Parse `(decl, decl, ...)` where the text includes its parentheses
fn parse_param_list(list: &str, depth: usize) -> Result<Vec<(ParamType, Option<String>)>, String> {
    if strip_enclosing(list).trim().is_empty() {
        return Ok(Vec::new());
    }
    split_top_level(list)
        .iter()
        .map(|item| parse_param(item, depth))
        .collect()
}

/// Split a declaration into its type text and whatever follows
fn split_type_text(item: &str) -> Result<(&str, &str), String> {
    if !item.starts_with('(') {
        return Ok(item.split_once(char::is_whitespace).unwrap_or((item, "")));
    }
    let mut end = matching_close(item, 0)
        .ok_or_else(|| format!("unbalanced parentheses in `{}`", item))?
        + 1;
    while item[end..].starts_with('[') {
        end = matching_close(item, end)
            .ok_or_else(|| format!("unbalanced brackets in `{}`", item))?
            + 1;
    }
    Ok((&item[..end], &item[end..]))
}

/// Parse one declaration: `type [modifiers] [name]`
fn parse_param(item: &str, depth: usize) -> Result<(ParamType, Option<String>), String> {
    let item = item.trim();
    if item.is_empty() {
        return Err("missing type in parameter list".to_string());
    }
    let (type_text, rest) = split_type_text(item)?;
    let mut words = rest.split_whitespace().peekable();

    // `address payable[]` declares an address array
    let mut type_text = Cow::Borrowed(type_text);
    if type_text == "address" {
        if let Some(suffix) = words.peek().and_then(|w| w.strip_prefix("payable")) {
            if suffix.starts_with('[') {
                type_text = Cow::Owned(format!("address{}", suffix));
                words.next();
            }
        }
    }

    let ty = parse_type_at(&type_text, depth)?;
    let name = words.find(|w| !MODIFIERS.contains(w)).map(str::to_string);
    Ok((ty, name))
}

/// Index of the `[` matching the `]` that was stripped from the end of `body`
fn array_suffix_start(body: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in body.char_indices().rev() {
        match c {
            ']' => depth += 1,
            '[' if depth == 0 => return Some(i),
            '[' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn parse_array_length(text: &str) -> Result<Option<usize>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid array length `{}`", text));
    }
    match text.parse::<usize>() {
        Ok(0) => Err("array length must be positive".to_string()),
        Ok(len) => Ok(Some(len)),
        Err(_) => Err(format!("array length `{}` is too large", text)),
    }
}

fn parse_type_at(text: &str, depth: usize) -> Result<ParamType, String> {
    if depth > MAX_NESTING_DEPTH {
        return Err(format!("type nesting exceeds {} levels", MAX_NESTING_DEPTH));
    }
    let text = text.trim();

    if let Some(body) = text.strip_suffix(']') {
        let open = array_suffix_start(body)
            .ok_or_else(|| format!("unbalanced brackets in `{}`", text))?;
        let len = parse_array_length(&body[open + 1..])?;
        let element = parse_type_at(&body[..open], depth + 1)?;
        return Ok(match element {
            ParamType::Tuple(fields) => ParamType::TupleArray(fields, len),
            other => ParamType::Array(Box::new(other), len),
        });
    }

    if text.starts_with('(') {
        if matching_close(text, 0) != Some(text.len() - 1) {
            return Err(format!("unbalanced parentheses in `{}`", text));
        }
        let fields = parse_param_list(text, depth + 1)?
            .into_iter()
            .map(|(ty, _)| ty)
            .collect();
        return Ok(ParamType::Tuple(fields));
    }

    parse_elementary(text)
}

fn parse_elementary(name: &str) -> Result<ParamType, String> {
    match name {
        "address" => return Ok(ParamType::Address),
        "bool" => return Ok(ParamType::Bool),
        "string" => return Ok(ParamType::String),
        "bytes" => return Ok(ParamType::Bytes),
        "uint" => return Ok(ParamType::Uint(256)),
        "int" => return Ok(ParamType::Int(256)),
        _ => {}
    }

    if let Some(bits) = name.strip_prefix("uint") {
        return parse_bits(name, bits).map(ParamType::Uint);
    }
    if let Some(bits) = name.strip_prefix("int") {
        return parse_bits(name, bits).map(ParamType::Int);
    }
    if let Some(size) = name.strip_prefix("bytes") {
        return match parse_digits(size) {
            Some(size) if (1..=32).contains(&size) => Ok(ParamType::FixedBytes(size)),
            _ => Err(format!("invalid fixed bytes type `{}`", name)),
        };
    }
    if name.is_empty() {
        return Err("missing type".to_string());
    }
    Err(format!("unknown type `{}`", name))
}

fn parse_bits(name: &str, bits: &str) -> Result<usize, String> {
    match parse_digits(bits) {
        Some(bits) if (8..=256).contains(&bits) && bits % 8 == 0 => Ok(bits),
        _ => Err(format!("invalid integer width in `{}`", name)),
    }
}

/// Plain decimal digits without sign or leading zero
fn parse_digits(text: &str) -> Option<usize> {
    if text.is_empty() || text.starts_with('0') || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
