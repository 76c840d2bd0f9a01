//! # ethutil-primitives
//!
//! Fixed-size byte types shared by the ethutil crates.
//!
//! Unsigned 256-bit integers come from `primitive-types`; addresses and
//! hashes are thin wrappers over byte arrays with hex conversions.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod hash;

pub use address::{Address, AddressError};
pub use hash::{HashError, H256};

// Re-export primitive-types for U256
pub use primitive_types::U256;

/// Strip a leading `0x` or `0X` from a hex string, if present.
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}
