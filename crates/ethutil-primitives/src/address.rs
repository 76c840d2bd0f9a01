//! Ethereum account address (20 bytes)

use std::fmt;
use thiserror::Error;

use crate::strip_hex_prefix;

/// Address parsing error
#[derive(Debug, Error)]
pub enum AddressError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}

/// Ethereum-compatible 20-byte address
///
/// Letter case of the hex form is not checked against EIP-55; any mix of
/// upper and lower case digits is accepted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// Size of address in bytes
    pub const LEN: usize = 20;

    /// Create address from bytes
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    /// Create address from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, AddressError> {
        let bytes: [u8; 20] = slice
            .try_into()
            .map_err(|_| AddressError::InvalidLength(slice.len()))?;
        Ok(Address(bytes))
    }

    /// Parse address from hex string (with or without 0x prefix)
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let bytes =
            hex::decode(strip_hex_prefix(s)).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get as byte slice
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Convert to lowercase hex string with 0x prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Parsing ====================

    #[test]
    fn test_address_from_hex() {
        let addr = Address::from_hex("0x8F36975cdeA2e6E64f85719788C8EFBBe89DFBbb").unwrap();
        assert_eq!(addr.as_bytes()[0], 0x8f);

        let addr2 = Address::from_hex("8F36975cdeA2e6E64f85719788C8EFBBe89DFBbb").unwrap();
        assert_eq!(addr, addr2);
    }

    #[test]
    fn test_address_from_hex_upper_prefix() {
        let a = Address::from_hex("0X8F36975cdeA2e6E64f85719788C8EFBBe89DFBbb").unwrap();
        let b = Address::from_hex("0x8f36975cdea2e6e64f85719788c8efbbe89dfbbb").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_address_checksum_not_enforced() {
        // Wrong EIP-55 casing is still accepted
        let lower = Address::from_hex("0x8f36975cdea2e6e64f85719788c8efbbe89dfbbb").unwrap();
        let odd = Address::from_hex("0x8F36975CDEA2e6e64f85719788c8efbbe89dfbbb").unwrap();
        assert_eq!(lower, odd);
    }

    #[test]
    fn test_address_from_hex_invalid_chars() {
        let result = Address::from_hex("0x8F36975cdeA2e6E64f85719788C8EFBBe89DFGGG");
        assert!(matches!(result, Err(AddressError::InvalidHex(_))));
    }

    #[test]
    fn test_address_from_hex_wrong_length() {
        assert!(matches!(
            Address::from_hex("0x8F36975cdeA2e6E64f85719788C8EFBBe89DFB"),
            Err(AddressError::InvalidLength(19))
        ));
        assert!(matches!(
            Address::from_hex("0x8F36975cdeA2e6E64f85719788C8EFBBe89DFBbb00"),
            Err(AddressError::InvalidLength(21))
        ));
    }

    #[test]
    fn test_address_from_hex_empty() {
        assert!(matches!(
            Address::from_hex(""),
            Err(AddressError::InvalidLength(0))
        ));
        assert!(Address::from_hex("0x").is_err());
    }

    #[test]
    fn test_address_from_slice() {
        assert!(Address::from_slice(&[0u8; 19]).is_err());
        assert!(Address::from_slice(&[0u8; 21]).is_err());
        assert_eq!(Address::from_slice(&[0u8; 20]).unwrap(), Address::default());
    }

    // ==================== Formatting ====================

    #[test]
    fn test_address_display_is_lowercase() {
        let addr = Address::from_hex("0x8F36975cdeA2e6E64f85719788C8EFBBe89DFBbb").unwrap();
        assert_eq!(
            format!("{}", addr),
            "0x8f36975cdea2e6e64f85719788c8efbbe89dfbbb"
        );
        assert_eq!(
            format!("{:?}", addr),
            "Address(0x8f36975cdea2e6e64f85719788c8efbbe89dfbbb)"
        );
    }

    #[test]
    fn test_default_address_hex() {
        assert_eq!(
            Address::default().to_hex(),
            "0x0000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_address_hex_roundtrip() {
        let original = Address::from_bytes([0xab; 20]);
        let parsed = Address::from_hex(&original.to_hex()).unwrap();
        assert_eq!(original, parsed);
    }
}
