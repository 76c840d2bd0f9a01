//! ABI type definitions

use std::borrow::Cow;
use std::fmt;

use ethutil_primitives::{Address, U256};

/// Deepest type nesting the parser and decoder will follow
pub const MAX_NESTING_DEPTH: usize = 32;

/// Size of one ABI word
pub const WORD: usize = 32;

/// Solidity parameter types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Address
    Address,
    /// Boolean
    Bool,
    /// UTF-8 string
    String,
    /// Dynamic bytes
    Bytes,
    /// Fixed-size bytes (size 1-32)
    FixedBytes(usize),
    /// Unsigned integer with bit size (8, 16, ..., 256)
    Uint(usize),
    /// Signed integer with bit size
    Int(usize),
    /// `T[]` when the length is `None`, `T[k]` otherwise
    Array(Box<ParamType>, Option<usize>),
    /// `(T1,T2,...)`
    Tuple(Vec<ParamType>),
    /// `(T1,T2,...)[]` or `(T1,T2,...)[k]`
    TupleArray(Vec<ParamType>, Option<usize>),
}

impl ParamType {
    /// Check if this type is dynamic (variable length)
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String => true,
            ParamType::Array(_, None) | ParamType::TupleArray(_, None) => true,
            ParamType::Array(inner, Some(_)) => inner.is_dynamic(),
            ParamType::Tuple(fields) | ParamType::TupleArray(fields, Some(_)) => {
                fields.iter().any(ParamType::is_dynamic)
            }
            _ => false,
        }
    }

    /// Bytes this type occupies in the head of an enclosing block.
    ///
    /// Dynamic types take one offset word; static tuples and fixed arrays
    /// are laid out inline.
    pub fn head_size(&self) -> usize {
        if self.is_dynamic() {
            return WORD;
        }
        match self {
            ParamType::Array(inner, Some(len)) => inner.head_size().saturating_mul(*len),
            ParamType::Tuple(fields) => fields_head_size(fields),
            ParamType::TupleArray(fields, Some(len)) => fields_head_size(fields).saturating_mul(*len),
            _ => WORD,
        }
    }

    /// Element type and declared length of an array type
    pub fn array_element(&self) -> Option<(Cow<'_, ParamType>, Option<usize>)> {
        match self {
            ParamType::Array(inner, len) => Some((Cow::Borrowed(inner.as_ref()), *len)),
            ParamType::TupleArray(fields, len) => {
                Some((Cow::Owned(ParamType::Tuple(fields.clone())), *len))
            }
            _ => None,
        }
    }
}

/// Sum of head sizes for a list of fields
pub(crate) fn fields_head_size(fields: &[ParamType]) -> usize {
    fields
        .iter()
        .map(ParamType::head_size)
        .fold(0, usize::saturating_add)
}

fn write_tuple(f: &mut fmt::Formatter<'_>, fields: &[ParamType]) -> fmt::Result {
    f.write_str("(")?;
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", field)?;
    }
    f.write_str(")")
}

fn write_len(f: &mut fmt::Formatter<'_>, len: Option<usize>) -> fmt::Result {
    match len {
        Some(len) => write!(f, "[{}]", len),
        None => f.write_str("[]"),
    }
}

/// Canonical type string, as hashed into function selectors
impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => f.write_str("address"),
            ParamType::Bool => f.write_str("bool"),
            ParamType::String => f.write_str("string"),
            ParamType::Bytes => f.write_str("bytes"),
            ParamType::FixedBytes(size) => write!(f, "bytes{}", size),
            ParamType::Uint(bits) => write!(f, "uint{}", bits),
            ParamType::Int(bits) => write!(f, "int{}", bits),
            ParamType::Array(inner, len) => {
                write!(f, "{}", inner)?;
                write_len(f, *len)
            }
            ParamType::Tuple(fields) => write_tuple(f, fields),
            ParamType::TupleArray(fields, len) => {
                write_tuple(f, fields)?;
                write_len(f, *len)
            }
        }
    }
}

/// Signed 256-bit integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct I256 {
    /// Absolute value
    pub abs: U256,
    /// Sign (true if negative)
    pub negative: bool,
}

impl I256 {
    /// Create a new I256; zero is never negative
    pub fn new(abs: U256, negative: bool) -> Self {
        Self {
            abs,
            negative: negative && !abs.is_zero(),
        }
    }

    /// Create from i128
    pub fn from_i128(value: i128) -> Self {
        Self::new(U256::from(value.unsigned_abs()), value < 0)
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.abs.is_zero()
    }

    /// Whether the value is representable as a two's-complement `intN`
    pub fn fits_in_bits(&self, bits: usize) -> bool {
        if bits == 0 || bits > 256 {
            return false;
        }
        let limit = U256::one() << (bits - 1);
        if self.negative {
            self.abs <= limit
        } else {
            self.abs < limit
        }
    }

    /// Two's-complement big-endian word (sign-extended to 256 bits)
    pub fn to_word(&self) -> [u8; 32] {
        let raw = if self.negative {
            (!self.abs).overflowing_add(U256::one()).0
        } else {
            self.abs
        };
        let mut word = [0u8; 32];
        raw.to_big_endian(&mut word);
        word
    }

    /// Read a two's-complement big-endian word
    pub fn from_word(word: &[u8]) -> Self {
        let raw = U256::from_big_endian(word);
        if raw.bit(255) {
            Self::new((!raw).overflowing_add(U256::one()).0, true)
        } else {
            Self::new(raw, false)
        }
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.abs)
        } else {
            write!(f, "{}", self.abs)
        }
    }
}

/// Solidity ABI values, mirroring [`ParamType`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Address (20 bytes)
    Address(Address),
    /// Unsigned integer and its declared bit width
    Uint(U256, usize),
    /// Signed integer and its declared bit width
    Int(I256, usize),
    /// Boolean
    Bool(bool),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// Fixed-size bytes (1-32)
    FixedBytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// Array elements, dynamic or fixed length
    Array(Vec<Token>),
    /// Tuple fields by position
    Tuple(Vec<Token>),
}

impl Token {
    /// Check that this value has the shape and range `param` demands
    pub fn type_check(&self, param: &ParamType) -> bool {
        match (param, self) {
            (ParamType::Address, Token::Address(_))
            | (ParamType::Bool, Token::Bool(_))
            | (ParamType::String, Token::String(_))
            | (ParamType::Bytes, Token::Bytes(_)) => true,
            (ParamType::FixedBytes(size), Token::FixedBytes(data)) => data.len() == *size,
            (ParamType::Uint(bits), Token::Uint(value, width)) => {
                bits == width && value.bits() <= *bits
            }
            (ParamType::Int(bits), Token::Int(value, width)) => {
                bits == width && value.fits_in_bits(*bits)
            }
            (ParamType::Array(inner, len), Token::Array(items)) => {
                len.map_or(true, |len| len == items.len())
                    && items.iter().all(|item| item.type_check(inner))
            }
            (ParamType::TupleArray(fields, len), Token::Array(items)) => {
                len.map_or(true, |len| len == items.len())
                    && items.iter().all(|item| match item {
                        Token::Tuple(values) => fields_match(fields, values),
                        _ => false,
                    })
            }
            (ParamType::Tuple(fields), Token::Tuple(values)) => fields_match(fields, values),
            _ => false,
        }
    }
}

fn fields_match(fields: &[ParamType], values: &[Token]) -> bool {
    fields.len() == values.len()
        && fields
            .iter()
            .zip(values)
            .all(|(field, value)| value.type_check(field))
}
