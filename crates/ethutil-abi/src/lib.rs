//! # ethutil-abi
//!
//! Solidity signature parsing and ABI encoding/decoding.
//!
//! A signature such as `transfer(address to, uint256 amount) returns (bool)`
//! is parsed into a [`FunctionSignature`]. Textual arguments are converted
//! into typed [`Token`]s and encoded as call data; raw call output is decoded
//! back into named values.
//!
//! ```
//! use ethutil_abi::{decode_call_output, encode_call, DebugOptions, FunctionSignature};
//!
//! let sig = FunctionSignature::parse("function balanceOf(address who) returns (uint256 balance)").unwrap();
//! let call = encode_call(&sig, &["0x00000000000000000000000000000000000000aa"], &DebugOptions::default()).unwrap();
//! assert_eq!(hex::encode(call.selector.unwrap()), "70a08231");
//!
//! let mut output = [0u8; 32];
//! output[31] = 7;
//! let values = decode_call_output(&sig, &output, &DebugOptions::default()).unwrap();
//! assert_eq!(values[0].0, "balance");
//! assert_eq!(values[0].1.to_string(), "7");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod decode;
mod encode;
mod error;
mod format;
mod json_abi;
mod literal;
mod options;
mod signature;
mod split;
mod types;

pub use decode::{decode, decode_call_output, decode_output};
pub use encode::{encode, encode_call, encode_function_call, EncodedCallData};
pub use error::AbiError;
pub use format::{dump_call_data, dump_words, format_outputs, outputs_to_json, token_to_json};
pub use json_abi::signature_from_abi_json;
pub use literal::{build_value, build_values};
pub use options::DebugOptions;
pub use signature::{
    extract_function_name, function_selector, parse_signature, parse_type, FunctionSignature,
};
pub use split::split_top_level;
pub use types::{ParamType, Token, I256, MAX_NESTING_DEPTH, WORD};
