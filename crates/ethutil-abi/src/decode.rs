//! ABI decoding

use std::cell::Cell;

use ethutil_primitives::{Address, U256};

use crate::error::AbiError;
use crate::options::DebugOptions;
use crate::signature::FunctionSignature;
use crate::types::{fields_head_size, ParamType, Token, I256, MAX_NESTING_DEPTH, WORD};

/// Decode tokens from ABI-encoded data
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, AbiError> {
    let needed = fields_head_size(types);
    if data.len() < needed {
        return Err(AbiError::Decode(format!(
            "insufficient data: {} types need at least {} bytes, have {}",
            types.len(),
            needed,
            data.len()
        )));
    }
    Decoder::new(data).block(types.iter(), 0, 0)
}

/// Decode named return values
pub fn decode_output(
    outputs: &[(String, ParamType)],
    data: &[u8],
) -> Result<Vec<(String, Token)>, AbiError> {
    let types: Vec<ParamType> = outputs.iter().map(|(_, ty)| ty.clone()).collect();
    let tokens = decode(&types, data)?;
    Ok(outputs
        .iter()
        .map(|(name, _)| name.clone())
        .zip(tokens)
        .collect())
}

/// Decode the output of a call to `signature`.
///
/// A signature without a `returns` clause decodes to nothing.
pub fn decode_call_output(
    signature: &FunctionSignature,
    data: &[u8],
    options: &DebugOptions,
) -> Result<Vec<(String, Token)>, AbiError> {
    if options.show_raw_output {
        tracing::info!("output raw data = 0x{}", hex::encode(data));
    }
    if signature.returns.is_empty() {
        tracing::debug!(function = %signature.name, "no return types declared, skipping decode");
        return Ok(Vec::new());
    }
    let values = decode_output(&signature.returns, data)?;
    tracing::debug!(
        function = %signature.name,
        values = values.len(),
        bytes = data.len(),
        "decoded call output"
    );
    Ok(values)
}

/// Check data has at least `needed` bytes
fn check_length(data: &[u8], needed: usize) -> Result<(), AbiError> {
    if data.len() < needed {
        return Err(AbiError::Decode(format!(
            "insufficient data: need {} bytes, have {}",
            needed,
            data.len()
        )));
    }
    Ok(())
}

/// Reads values out of one encoded buffer; all offsets are absolute positions.
///
/// Offsets may alias, so every decoded value and every word of byte content
/// is charged against a budget proportional to the input size.
struct Decoder<'a> {
    data: &'a [u8],
    budget: Cell<usize>,
}

impl<'a> Decoder<'a> {
    fn new(data: &'a [u8]) -> Self {
        let words = data.len() / WORD + 1;
        Decoder {
            data,
            budget: Cell::new(words.saturating_mul(MAX_NESTING_DEPTH + 2)),
        }
    }

    fn charge(&self, units: usize) -> Result<(), AbiError> {
        let left = self.budget.get().checked_sub(units).ok_or_else(|| {
            AbiError::Decode(format!(
                "decoded output exceeds what {} bytes of data can encode",
                self.data.len()
            ))
        })?;
        self.budget.set(left);
        Ok(())
    }

    fn word(&self, at: usize) -> Result<&'a [u8], AbiError> {
        let end = at
            .checked_add(WORD)
            .ok_or_else(|| AbiError::Decode(format!("position {} out of range", at)))?;
        check_length(self.data, end)?;
        Ok(&self.data[at..end])
    }

    /// Word at `at` read as an offset or length
    fn read_usize(&self, at: usize) -> Result<usize, AbiError> {
        let value = U256::from_big_endian(self.word(at)?);
        if value > U256::from(usize::MAX) {
            return Err(AbiError::Decode(format!(
                "value {} at position {} is not a usable offset or length",
                value, at
            )));
        }
        Ok(value.as_usize())
    }

    /// Decode consecutive members laid out as one head/tail block at `base`
    fn block<'t>(
        &self,
        types: impl Iterator<Item = &'t ParamType>,
        base: usize,
        depth: usize,
    ) -> Result<Vec<Token>, AbiError> {
        if depth > MAX_NESTING_DEPTH {
            return Err(AbiError::Decode(format!(
                "nesting deeper than {} levels",
                MAX_NESTING_DEPTH
            )));
        }
        let mut tokens = Vec::new();
        let mut cursor = base;
        for param_type in types {
            tokens.push(self.member(param_type, base, cursor, depth)?);
            cursor = cursor.saturating_add(param_type.head_size());
        }
        Ok(tokens)
    }

    /// Decode the member whose head sits at `cursor` inside the block at `base`
    fn member(
        &self,
        param_type: &ParamType,
        base: usize,
        cursor: usize,
        depth: usize,
    ) -> Result<Token, AbiError> {
        self.charge(1)?;
        if !param_type.is_dynamic() {
            return self.inline(param_type, cursor, depth);
        }
        let offset = self.read_usize(cursor)?;
        let target = base
            .checked_add(offset)
            .filter(|target| *target <= self.data.len())
            .ok_or_else(|| {
                AbiError::Decode(format!(
                    "offset {} at position {} points outside {} bytes of data",
                    offset,
                    cursor,
                    self.data.len()
                ))
            })?;
        self.tail(param_type, target, depth)
    }

    /// Decode a dynamic value whose encoding starts at `at`
    fn tail(&self, param_type: &ParamType, at: usize, depth: usize) -> Result<Token, AbiError> {
        match param_type {
            ParamType::Bytes => Ok(Token::Bytes(self.bytes(at)?.to_vec())),
            ParamType::String => {
                let s = String::from_utf8(self.bytes(at)?.to_vec())
                    .map_err(|e| AbiError::Decode(format!("Invalid UTF-8: {}", e)))?;
                Ok(Token::String(s))
            }
            ParamType::Array(_, None) | ParamType::TupleArray(_, None) => {
                let len = self.read_usize(at)?;
                self.array(param_type, len, at + WORD, depth)
            }
            // Dynamic fixed arrays and tuples have no length word
            _ => self.inline(param_type, at, depth),
        }
    }

    /// Decode a value laid out at `at` without indirection
    fn inline(&self, param_type: &ParamType, at: usize, depth: usize) -> Result<Token, AbiError> {
        match param_type {
            ParamType::Address => {
                let word = self.word(at)?;
                let mut addr_bytes = [0u8; 20];
                addr_bytes.copy_from_slice(&word[12..]);
                Ok(Token::Address(Address::from_bytes(addr_bytes)))
            }
            ParamType::Uint(bits) => {
                let value = U256::from_big_endian(self.word(at)?);
                if value.bits() > *bits {
                    return Err(out_of_range(param_type, at));
                }
                Ok(Token::Uint(value, *bits))
            }
            ParamType::Int(bits) => {
                let value = I256::from_word(self.word(at)?);
                if !value.fits_in_bits(*bits) {
                    return Err(out_of_range(param_type, at));
                }
                Ok(Token::Int(value, *bits))
            }
            ParamType::Bool => {
                let value = U256::from_big_endian(self.word(at)?);
                if value > U256::one() {
                    return Err(out_of_range(param_type, at));
                }
                Ok(Token::Bool(!value.is_zero()))
            }
            ParamType::FixedBytes(size) => {
                let size = (*size).min(WORD);
                Ok(Token::FixedBytes(self.word(at)?[..size].to_vec()))
            }
            ParamType::Array(_, Some(len)) | ParamType::TupleArray(_, Some(len)) => {
                self.array(param_type, *len, at, depth)
            }
            ParamType::Tuple(fields) => Ok(Token::Tuple(self.block(fields.iter(), at, depth + 1)?)),
            ParamType::Bytes
            | ParamType::String
            | ParamType::Array(_, None)
            | ParamType::TupleArray(_, None) => Err(AbiError::Decode(format!(
                "{} has no inline encoding",
                param_type
            ))),
        }
    }

    /// Decode `len` elements whose block starts at `base`
    fn array(
        &self,
        param_type: &ParamType,
        len: usize,
        base: usize,
        depth: usize,
    ) -> Result<Token, AbiError> {
        let (element, _) = param_type
            .array_element()
            .ok_or_else(|| AbiError::Decode(format!("{} is not an array", param_type)))?;

        // Every element occupies at least its head; reject lengths the data cannot hold
        let needed = element
            .head_size()
            .checked_mul(len)
            .and_then(|size| size.checked_add(base))
            .ok_or_else(|| AbiError::Decode(format!("array length {} too large", len)))?;
        check_length(self.data, needed)?;
        // Empty tuples take no space, so bound their count by the data size instead
        if element.head_size() == 0 && len > self.data.len() {
            return Err(AbiError::Decode(format!("array length {} too large", len)));
        }

        let tokens = self.block(std::iter::repeat(&*element).take(len), base, depth + 1)?;
        Ok(Token::Array(tokens))
    }

    /// Length-prefixed byte string at `at`
    fn bytes(&self, at: usize) -> Result<&'a [u8], AbiError> {
        let len = self.read_usize(at)?;
        let start = at + WORD;
        let end = start
            .checked_add(len)
            .ok_or_else(|| AbiError::Decode(format!("byte length {} too large", len)))?;
        check_length(self.data, end)?;
        self.charge(len / WORD)?;
        Ok(&self.data[start..end])
    }
}

fn out_of_range(param_type: &ParamType, at: usize) -> AbiError {
    AbiError::Decode(format!(
        "word at position {} is out of range for {}",
        at, param_type
    ))
}
