//! Conversion of textual argument literals into typed values

use std::borrow::Cow;

use ethutil_primitives::{strip_hex_prefix, Address, U256};

use crate::error::AbiError;
use crate::split::{split_top_level, strip_enclosing, unquote};
use crate::types::{ParamType, Token, I256};

/// Decimal digits in the largest uint256
const MAX_UINT_DIGITS: usize = 78;

/// Why a single literal was rejected
struct Rejection {
    literal: String,
    ty: String,
    reason: String,
}

impl Rejection {
    fn new(param: &ParamType, literal: &str, reason: impl Into<String>) -> Self {
        Self {
            literal: literal.to_string(),
            ty: param.to_string(),
            reason: reason.into(),
        }
    }

    fn at(self, position: usize) -> AbiError {
        AbiError::Value {
            position,
            literal: self.literal,
            ty: self.ty,
            reason: self.reason,
        }
    }
}

/// Convert one literal under `param`
pub fn build_value(param: &ParamType, literal: &str) -> Result<Token, AbiError> {
    convert(param, literal).map_err(|rejection| rejection.at(0))
}

/// Convert one literal per parameter, reporting the failing position
pub fn build_values<S: AsRef<str>>(params: &[ParamType], literals: &[S]) -> Result<Vec<Token>, AbiError> {
    if params.len() != literals.len() {
        return Err(AbiError::ArgumentCount {
            expected: params.len(),
            got: literals.len(),
        });
    }
    params
        .iter()
        .zip(literals)
        .enumerate()
        .map(|(position, (param, literal))| {
            tracing::trace!(position, ty = %param, literal = literal.as_ref(), "converting argument");
            convert(param, literal.as_ref()).map_err(|rejection| rejection.at(position))
        })
        .collect()
}

fn convert(param: &ParamType, literal: &str) -> Result<Token, Rejection> {
    match param {
        ParamType::Bool => parse_bool(literal.trim())
            .map(Token::Bool)
            .ok_or_else(|| Rejection::new(param, literal, "expected true or false")),
        ParamType::Address => parse_address(literal.trim())
            .map(Token::Address)
            .map_err(|reason| Rejection::new(param, literal, reason)),
        ParamType::Uint(bits) => parse_uint(literal.trim(), *bits)
            .map(|value| Token::Uint(value, *bits))
            .map_err(|reason| Rejection::new(param, literal, reason)),
        ParamType::Int(bits) => parse_int(literal.trim(), *bits)
            .map(|value| Token::Int(value, *bits))
            .map_err(|reason| Rejection::new(param, literal, reason)),
        ParamType::Bytes => parse_hex(literal)
            .map(Token::Bytes)
            .map_err(|reason| Rejection::new(param, literal, reason)),
        ParamType::FixedBytes(size) => parse_fixed_bytes(literal, *size)
            .map(Token::FixedBytes)
            .map_err(|reason| Rejection::new(param, literal, reason)),
        ParamType::String => Ok(Token::String(literal.to_string())),
        ParamType::Array(..) | ParamType::TupleArray(..) => {
            let Some((element, len)) = param.array_element() else {
                return Err(Rejection::new(param, literal, "not an array type"));
            };
            let items = list_items(literal);
            if let Some(len) = len {
                if items.len() != len {
                    return Err(Rejection::new(
                        param,
                        literal,
                        format!("expected {} elements, got {}", len, items.len()),
                    ));
                }
            }
            items
                .iter()
                .map(|item| convert(&element, unquote(item)))
                .collect::<Result<Vec<_>, _>>()
                .map(Token::Array)
        }
        ParamType::Tuple(fields) => {
            let items = list_items(literal);
            if items.len() != fields.len() {
                return Err(Rejection::new(
                    param,
                    literal,
                    format!("expected {} tuple fields, got {}", fields.len(), items.len()),
                ));
            }
            fields
                .iter()
                .zip(&items)
                .map(|(field, item)| convert(field, unquote(item)))
                .collect::<Result<Vec<_>, _>>()
                .map(Token::Tuple)
        }
    }
}

/// Top-level items of an array or tuple literal; blank interior means none
fn list_items(literal: &str) -> Vec<String> {
    if strip_enclosing(literal).trim().is_empty() {
        Vec::new()
    } else {
        split_top_level(literal)
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_address(text: &str) -> Result<Address, String> {
    let digits = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(digits) => digits,
        None => return Err("address must start with 0x".to_string()),
    };
    if digits.len() != Address::LEN * 2 {
        return Err(format!("expected 40 hex digits, got {}", digits.len()));
    }
    Address::from_hex(digits).map_err(|e| e.to_string())
}

fn parse_uint(text: &str, bits: usize) -> Result<U256, String> {
    let digits: Cow<'_, str> = if bits == 256 && text.contains(['e', 'E']) {
        Cow::Owned(expand_scientific(text)?)
    } else {
        Cow::Borrowed(text)
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err("not a base-10 integer".to_string());
    }
    let value = U256::from_dec_str(&digits).map_err(|_| "value exceeds 256 bits".to_string())?;
    if value.bits() > bits {
        return Err(format!("value out of range for uint{}", bits));
    }
    Ok(value)
}

fn parse_int(text: &str, bits: usize) -> Result<I256, String> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err("not a base-10 integer".to_string());
    }
    let abs = U256::from_dec_str(digits).map_err(|_| "value exceeds 256 bits".to_string())?;
    let value = I256::new(abs, negative);
    if !value.fits_in_bits(bits) {
        return Err(format!("value out of range for int{}", bits));
    }
    Ok(value)
}

/// Expand `<digits>[.<digits>]e<digits>` into plain decimal digits
fn expand_scientific(text: &str) -> Result<String, String> {
    let malformed = || format!("malformed scientific notation `{}`", text);
    let (mantissa, exponent) = text.split_once(['e', 'E']).ok_or_else(malformed)?;
    if exponent.is_empty() || !exponent.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(malformed());
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    let fraction = fraction.trim_end_matches('0');
    let digits = format!("{}{}", whole, fraction);
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok("0".to_string());
    }

    let exponent: usize = exponent
        .parse()
        .map_err(|_| "exponent too large".to_string())?;
    if fraction.len() > exponent {
        return Err(format!("`{}` is not an integer", text));
    }
    let zeros = exponent - fraction.len();
    if significant.len().saturating_add(zeros) > MAX_UINT_DIGITS {
        return Err("value exceeds 256 bits".to_string());
    }
    Ok(format!("{}{}", significant, "0".repeat(zeros)))
}

fn parse_hex(text: &str) -> Result<Vec<u8>, String> {
    hex::decode(strip_hex_prefix(text.trim())).map_err(|e| format!("invalid hex: {}", e))
}

fn parse_fixed_bytes(text: &str, size: usize) -> Result<Vec<u8>, String> {
    let mut data = parse_hex(text)?;
    if data.len() > size {
        return Err(format!("{} bytes do not fit in bytes{}", data.len(), size));
    }
    data.resize(size, 0);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::parse_type;

    fn value(ty: &str, literal: &str) -> Token {
        build_value(&parse_type(ty).unwrap(), literal).unwrap()
    }

    fn reject(ty: &str, literal: &str) -> AbiError {
        build_value(&parse_type(ty).unwrap(), literal).unwrap_err()
    }

    fn uint(v: u64) -> Token {
        Token::Uint(U256::from(v), 256)
    }

    // ==================== Elementary ====================

    #[test]
    fn test_bool_case_insensitive() {
        assert_eq!(value("bool", "true"), Token::Bool(true));
        assert_eq!(value("bool", "TRUE"), Token::Bool(true));
        assert_eq!(value("bool", " False "), Token::Bool(false));
        assert!(matches!(reject("bool", "yes"), AbiError::Value { .. }));
    }

    #[test]
    fn test_address() {
        let token = value("address", "0xdAC17F958D2ee523a2206206994597C13D831ec7");
        match token {
            Token::Address(addr) => {
                assert_eq!(addr.to_hex(), "0xdac17f958d2ee523a2206206994597c13d831ec7")
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(reject("address", "dAC17F958D2ee523a2206206994597C13D831ec7"), AbiError::Value { .. }));
        assert!(matches!(reject("address", "0x1234"), AbiError::Value { .. }));
        assert!(matches!(reject("address", "0xzz17F958D2ee523a2206206994597C13D831ec7"), AbiError::Value { .. }));
    }

    #[test]
    fn test_uint_ranges() {
        assert_eq!(value("uint8", "255"), Token::Uint(U256::from(255), 8));
        assert!(matches!(reject("uint8", "256"), AbiError::Value { .. }));
        assert!(matches!(reject("uint256", "-1"), AbiError::Value { .. }));
        assert!(matches!(reject("uint256", "0x10"), AbiError::Value { .. }));
        assert!(matches!(reject("uint256", ""), AbiError::Value { .. }));

        let max = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        assert_eq!(value("uint256", max), Token::Uint(U256::MAX, 256));
        let over = "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(matches!(reject("uint256", over), AbiError::Value { .. }));
    }

    #[test]
    fn test_int_ranges() {
        assert_eq!(value("int8", "-128"), Token::Int(I256::from_i128(-128), 8));
        assert_eq!(value("int8", "127"), Token::Int(I256::from_i128(127), 8));
        assert!(matches!(reject("int8", "128"), AbiError::Value { .. }));
        assert!(matches!(reject("int8", "-129"), AbiError::Value { .. }));
        assert_eq!(value("int", "-5"), Token::Int(I256::from_i128(-5), 256));
        assert!(matches!(reject("int256", "--5"), AbiError::Value { .. }));
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(value("uint256", "1e18"), uint(1_000_000_000_000_000_000));
        assert_eq!(value("uint", "1.5e3"), uint(1500));
        assert_eq!(value("uint256", "2.50E2"), uint(250));
        assert_eq!(value("uint256", "0e99999"), uint(0));
        assert!(matches!(reject("uint256", "1.25e1"), AbiError::Value { .. }));
        assert!(matches!(reject("uint256", "1e"), AbiError::Value { .. }));
        assert!(matches!(reject("uint256", "1e100"), AbiError::Value { .. }));
        // Only accepted for 256-bit unsigned integers
        assert!(matches!(reject("uint128", "1e3"), AbiError::Value { .. }));
        assert!(matches!(reject("int256", "1e3"), AbiError::Value { .. }));
    }

    #[test]
    fn test_bytes_and_fixed_bytes() {
        assert_eq!(value("bytes", "0xdeadbeef"), Token::Bytes(vec![0xde, 0xad, 0xbe, 0xef]));
        assert_eq!(value("bytes", "dead"), Token::Bytes(vec![0xde, 0xad]));
        assert_eq!(value("bytes", "0x"), Token::Bytes(vec![]));
        assert_eq!(
            value("bytes4", "0x1234"),
            Token::FixedBytes(vec![0x12, 0x34, 0x00, 0x00])
        );
        assert!(matches!(reject("bytes2", "0x123456"), AbiError::Value { .. }));
        assert!(matches!(reject("bytes", "0x123"), AbiError::Value { .. }));
    }

    #[test]
    fn test_string_verbatim() {
        assert_eq!(value("string", " hi, there "), Token::String(" hi, there ".to_string()));
        assert_eq!(value("string", ""), Token::String(String::new()));
    }

    // ==================== Composite ====================

    #[test]
    fn test_arrays() {
        assert_eq!(value("uint256[]", "[1, 2]"), Token::Array(vec![uint(1), uint(2)]));
        assert_eq!(value("uint256[]", "[]"), Token::Array(vec![]));
        assert_eq!(value("uint256[]", "[ ]"), Token::Array(vec![]));
        assert_eq!(
            value("uint256[][]", "[[1],[2,3]]"),
            Token::Array(vec![
                Token::Array(vec![uint(1)]),
                Token::Array(vec![uint(2), uint(3)]),
            ])
        );
    }

    #[test]
    fn test_fixed_array_count() {
        assert_eq!(value("bool[2]", "[true,false]"), Token::Array(vec![Token::Bool(true), Token::Bool(false)]));
        assert!(matches!(reject("bool[2]", "[true]"), AbiError::Value { .. }));
        assert!(matches!(reject("bool[2]", "[]"), AbiError::Value { .. }));
    }

    #[test]
    fn test_string_array_unquotes() {
        assert_eq!(
            value("string[]", r#"["a,b", "c"]"#),
            Token::Array(vec![
                Token::String("a,b".to_string()),
                Token::String("c".to_string()),
            ])
        );
    }

    #[test]
    fn test_tuples() {
        assert_eq!(
            value("(uint256,bool)", "(7, true)"),
            Token::Tuple(vec![uint(7), Token::Bool(true)])
        );
        assert_eq!(
            value("(uint256,bool)[]", "[(1,true),(2,false)]"),
            Token::Array(vec![
                Token::Tuple(vec![uint(1), Token::Bool(true)]),
                Token::Tuple(vec![uint(2), Token::Bool(false)]),
            ])
        );
        assert!(matches!(reject("(uint256,bool)", "(1,true,3)"), AbiError::Value { .. }));
    }

    #[test]
    fn test_nested_rejection_names_inner_literal() {
        match reject("uint8[]", "[1, 300]") {
            AbiError::Value { literal, ty, .. } => {
                assert_eq!(literal, "300");
                assert_eq!(ty, "uint8");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    // ==================== Argument lists ====================

    #[test]
    fn test_build_values_positions() {
        let params = vec![ParamType::Address, ParamType::Uint(8)];
        let err = build_values(&params, &["0x0000000000000000000000000000000000000001", "999"]).unwrap_err();
        assert!(matches!(err, AbiError::Value { position: 1, .. }));
    }

    #[test]
    fn test_build_values_count_mismatch() {
        let params = vec![ParamType::Bool];
        let err = build_values::<&str>(&params, &[]).unwrap_err();
        assert_eq!(err, AbiError::ArgumentCount { expected: 1, got: 0 });
        assert!(err.is_grammar());
    }
}
