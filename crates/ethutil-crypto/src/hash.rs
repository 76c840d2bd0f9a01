//! Keccak-256 hashing

use std::io::{self, Read};

use ethutil_primitives::H256;
use sha3::{Digest, Keccak256};

const READ_CHUNK: usize = 8 * 1024;

/// Compute Keccak-256 hash of the input data
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    H256::from_bytes(hasher.finalize().into())
}

/// Compute Keccak-256 over everything readable from `reader`
pub fn keccak256_reader<R: Read>(mut reader: R) -> io::Result<H256> {
    let mut hasher = Keccak256::new();
    let mut buf = [0u8; READ_CHUNK];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(H256::from_bytes(hasher.finalize().into()))
}
