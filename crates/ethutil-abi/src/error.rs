//! ABI codec error types

use thiserror::Error;

/// Codec error type
///
/// Every failure is a deterministic function of the input; nothing is
/// retried and no partial value survives an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Malformed signature or type string
    #[error("invalid signature `{input}`: {reason}")]
    Grammar {
        /// The signature or type text as supplied
        input: String,
        /// What is wrong with it
        reason: String,
    },

    /// Number of literals differs from the number of parameters
    #[error("invalid input, there are {expected} args in signature, but {got} args are provided")]
    ArgumentCount {
        /// Parameters declared by the signature
        expected: usize,
        /// Literals supplied
        got: usize,
    },

    /// A literal cannot be converted under its declared type
    #[error("arg (position {position}) invalid, `{literal}` cannot convert to type {ty}: {reason}")]
    Value {
        /// Zero-based argument position
        position: usize,
        /// The offending literal (innermost item for nested values)
        literal: String,
        /// Canonical type the literal was converted to
        ty: String,
        /// What is wrong with it
        reason: String,
    },

    /// Raw output bytes do not fit the declared types
    #[error("ABI decoding error: {0}")]
    Decode(String),

    /// A value's shape does not match its type
    #[error("value does not match type {0}")]
    TypeMismatch(String),

    /// ABI JSON document could not be read
    #[error("invalid ABI JSON: {0}")]
    AbiJson(String),

    /// Function name absent from an ABI JSON document
    #[error("function {0} not found in ABI")]
    FunctionNotFound(String),
}

impl AbiError {
    /// True for errors caused by the signature rather than the arguments
    pub fn is_grammar(&self) -> bool {
        matches!(self, AbiError::Grammar { .. } | AbiError::ArgumentCount { .. })
    }
}

impl From<serde_json::Error> for AbiError {
    fn from(e: serde_json::Error) -> Self {
        AbiError::AbiJson(e.to_string())
    }
}
