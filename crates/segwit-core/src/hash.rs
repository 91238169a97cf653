//! SHA256 helpers.

use sha2::{Digest, Sha256};

/// Single SHA256 hash.
///
/// This is the witness-script hash committed to by a P2WSH output.
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let hash = Sha256::digest(data);
    let mut result = [0u8; 32];
    result.copy_from_slice(&hash);
    result
}
