//! ABI encoding

use ethutil_primitives::U256;

use crate::error::AbiError;
use crate::literal::build_values;
use crate::options::DebugOptions;
use crate::signature::FunctionSignature;
use crate::types::{ParamType, Token, WORD};

/// Encoded call data: optional selector followed by the parameter block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCallData {
    /// Function selector, absent for a bare parameter list
    pub selector: Option<[u8; 4]>,
    /// Head/tail encoded parameters
    pub body: Vec<u8>,
}

impl EncodedCallData {
    /// Total length in bytes
    pub fn len(&self) -> usize {
        self.selector.map_or(0, |s| s.len()) + self.body.len()
    }

    /// True when there is neither selector nor body
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Selector and body concatenated
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.len());
        if let Some(selector) = self.selector {
            data.extend_from_slice(&selector);
        }
        data.extend_from_slice(&self.body);
        data
    }

    /// `0x`-prefixed lowercase hex of [`to_bytes`](Self::to_bytes)
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }
}

/// Encode values according to their types.
///
/// Every value must pass [`Token::type_check`] against its type.
pub fn encode(types: &[ParamType], tokens: &[Token]) -> Result<Vec<u8>, AbiError> {
    if types.len() != tokens.len() {
        return Err(AbiError::TypeMismatch(format!(
            "{} types but {} values",
            types.len(),
            tokens.len()
        )));
    }
    if let Some((ty, _)) = types
        .iter()
        .zip(tokens)
        .find(|(ty, token)| !token.type_check(ty))
    {
        return Err(AbiError::TypeMismatch(ty.to_string()));
    }
    let pairs: Vec<(&ParamType, &Token)> = types.iter().zip(tokens).collect();
    encode_block(&pairs)
}

/// Encode function call (selector + params)
pub fn encode_function_call(
    selector: [u8; 4],
    types: &[ParamType],
    tokens: &[Token],
) -> Result<Vec<u8>, AbiError> {
    let mut result = selector.to_vec();
    result.extend(encode(types, tokens)?);
    Ok(result)
}

/// Convert textual arguments under `signature` and encode the call
pub fn encode_call<S: AsRef<str>>(
    signature: &FunctionSignature,
    args: &[S],
    options: &DebugOptions,
) -> Result<EncodedCallData, AbiError> {
    let tokens = build_values(&signature.params, args)?;
    let call = EncodedCallData {
        selector: signature.selector(),
        body: encode(&signature.params, &tokens)?,
    };

    tracing::debug!(
        function = %signature.canonical(),
        args = args.len(),
        bytes = call.len(),
        "encoded call data"
    );
    if options.show_input_data {
        tracing::info!("input data = {}", call.to_hex());
    }
    Ok(call)
}

/// Encode one block: heads in order, then the tails of dynamic members
fn encode_block(pairs: &[(&ParamType, &Token)]) -> Result<Vec<u8>, AbiError> {
    let head_size = pairs
        .iter()
        .map(|(ty, _)| ty.head_size())
        .fold(0, usize::saturating_add);

    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for (param_type, token) in pairs {
        if param_type.is_dynamic() {
            // Offset is relative to the start of this block
            let offset = head_size + tail.len();
            head.extend(encode_u256(&U256::from(offset)));
            tail.extend(encode_token(param_type, token)?);
        } else {
            head.extend(encode_token(param_type, token)?);
        }
    }

    head.extend(tail);
    Ok(head)
}

/// Encode a single token
fn encode_token(param_type: &ParamType, token: &Token) -> Result<Vec<u8>, AbiError> {
    match (param_type, token) {
        (ParamType::Address, Token::Address(addr)) => {
            let mut buf = [0u8; WORD];
            buf[12..].copy_from_slice(addr.as_bytes());
            Ok(buf.to_vec())
        }
        (ParamType::Uint(_), Token::Uint(value, _)) => Ok(encode_u256(value)),
        (ParamType::Int(_), Token::Int(value, _)) => Ok(value.to_word().to_vec()),
        (ParamType::Bool, Token::Bool(b)) => {
            let mut buf = [0u8; WORD];
            buf[WORD - 1] = u8::from(*b);
            Ok(buf.to_vec())
        }
        (ParamType::FixedBytes(size), Token::FixedBytes(data)) if data.len() == *size => {
            let mut buf = [0u8; WORD];
            buf[..data.len()].copy_from_slice(data);
            Ok(buf.to_vec())
        }
        (ParamType::Bytes, Token::Bytes(data)) => Ok(encode_bytes(data)),
        (ParamType::String, Token::String(s)) => Ok(encode_bytes(s.as_bytes())),
        (ParamType::Array(..) | ParamType::TupleArray(..), Token::Array(tokens)) => {
            let Some((element, len)) = param_type.array_element() else {
                return Err(AbiError::TypeMismatch(param_type.to_string()));
            };
            let mut result = Vec::with_capacity(WORD + element.head_size().saturating_mul(tokens.len()));
            if len.is_none() {
                result.extend(encode_u256(&U256::from(tokens.len())));
            }
            let pairs: Vec<(&ParamType, &Token)> =
                tokens.iter().map(|token| (&*element, token)).collect();
            result.extend(encode_block(&pairs)?);
            Ok(result)
        }
        (ParamType::Tuple(types), Token::Tuple(tokens)) if types.len() == tokens.len() => {
            let pairs: Vec<(&ParamType, &Token)> = types.iter().zip(tokens).collect();
            encode_block(&pairs)
        }
        _ => Err(AbiError::TypeMismatch(param_type.to_string())),
    }
}

/// Encode a U256 as 32 bytes
fn encode_u256(value: &U256) -> Vec<u8> {
    let mut bytes = [0u8; WORD];
    value.to_big_endian(&mut bytes);
    bytes.to_vec()
}

/// Encode dynamic bytes: length word, then data right-padded to a word boundary
fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let mut result = encode_u256(&U256::from(data.len()));

    let padded_len = data.len().div_ceil(WORD) * WORD;
    let mut padded = vec![0u8; padded_len];
    padded[..data.len()].copy_from_slice(data);
    result.extend(padded);

    result
}
