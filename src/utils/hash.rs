//! Content fingerprints used as dedupe keys.
//!
//! Uses `blake3` so keys are stable across processes and platforms
//! (unlike `FxHasher`, whose output is only meant for in-memory tables).
//!
//! # Usage
//!
//! ```ignore
//! use crate::utils::hash;
//!
//! let key = hash::fingerprint("css/site.css"); // -> "a1b2c3d4e5f60718..."
//! ```

/// Compute the 256-bit digest of byte data.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> [u8; 32] {
    *blake3::hash(data.as_ref()).as_bytes()
}

/// Compute the digest and return it as a 32-char hex fingerprint.
///
/// 128 bits of the digest are plenty for per-page dedupe.
#[inline]
pub fn fingerprint<T: AsRef<[u8]> + ?Sized>(value: &T) -> String {
    hex::encode(&compute(value)[..16])
}
