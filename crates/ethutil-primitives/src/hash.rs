//! 256-bit hash type

use std::fmt;
use thiserror::Error;

use crate::strip_hex_prefix;

/// Hash parsing error
#[derive(Debug, Error)]
pub enum HashError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid hash length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
}

/// 256-bit hash (32 bytes)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct H256([u8; 32]);

impl H256 {
    /// Size in bytes
    pub const LEN: usize = 32;

    /// Create from bytes
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        H256(bytes)
    }

    /// Create from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, HashError> {
        let bytes: [u8; 32] = slice.try_into().map_err(|_| HashError::InvalidLength {
            expected: Self::LEN,
            got: slice.len(),
        })?;
        Ok(H256(bytes))
    }

    /// Parse from hex string
    pub fn from_hex(s: &str) -> Result<Self, HashError> {
        let bytes =
            hex::decode(strip_hex_prefix(s)).map_err(|e| HashError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H256({})", self.to_hex())
    }
}

impl fmt::Display for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_h256_from_hex() {
        let hex = "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8";
        let hash = H256::from_hex(hex).unwrap();
        assert_eq!(hash.to_hex(), hex);
        assert_eq!(hash.as_bytes()[0], 0x1c);
    }

    #[test]
    fn test_h256_display() {
        let hash = H256::from_bytes([0u8; 32]);
        assert_eq!(hash.to_string(), format!("0x{}", "0".repeat(64)));
        assert_eq!(format!("{:?}", hash), format!("H256({})", hash));
    }

    #[test]
    fn test_h256_invalid_length() {
        match H256::from_hex("0xabcd") {
            Err(HashError::InvalidLength { expected, got }) => {
                assert_eq!(expected, 32);
                assert_eq!(got, 2);
            }
            other => panic!("Expected InvalidLength, got {:?}", other),
        }
    }

    #[test]
    fn test_h256_invalid_hex() {
        assert!(matches!(
            H256::from_hex(&"zz".repeat(32)),
            Err(HashError::InvalidHex(_))
        ));
    }
}
