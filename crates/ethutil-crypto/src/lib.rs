//! # ethutil-crypto
//!
//! Keccak-256, the hash behind function selectors and the `keccak`
//! subcommand.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod hash;

pub use hash::{keccak256, keccak256_reader};
