//! Stable hashing utilities for keys and buckets.
//!
//! Goals:
//! - Use a stable, explicit hash (not std::DefaultHasher) to keep bucket mapping
//!   invariant across toolchains/platforms.
//! - Keep the hash selectable so the map can carry the kind it was built with.
//!
//! Keys are anything implementing `std::hash::Hash`; the `Hash`/`Eq` contract
//! guarantees that equal keys feed identical bytes to the hasher and therefore
//! land in the same bucket.

use std::fmt;
use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

/// Type of stable hash used by the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashKind {
    /// 64-bit xxhash with seed=0. Fast and stable.
    Xx64Seed0,
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashKind::Xx64Seed0 => write!(f, "xxhash64(seed=0)"),
        }
    }
}

/// Default hash kind for new maps.
pub const HASH_KIND_DEFAULT: HashKind = HashKind::Xx64Seed0;

/// Compute 64-bit stable hash of a key for given kind.
pub fn hash64<K: Hash + ?Sized>(kind: HashKind, key: &K) -> u64 {
    match kind {
        HashKind::Xx64Seed0 => {
            let mut h = XxHash64::with_seed(0);
            key.hash(&mut h);
            h.finish()
        }
    }
}

/// Compute bucket index from a 64-bit hash value.
#[inline]
pub fn bucket_index(hash: u64, buckets: usize) -> usize {
    debug_assert!(buckets > 0, "buckets must be > 0");
    (hash % (buckets as u64)) as usize
}

/// Stable mapping from key -> bucket using the selected hash kind.
#[inline]
pub fn bucket_of_key<K: Hash + ?Sized>(kind: HashKind, key: &K, buckets: usize) -> usize {
    let h = hash64(kind, key);
    bucket_index(h, buckets)
}

/// Convenience wrapper that uses the crate-wide default hash kind.
#[inline]
pub fn bucket_of_key_default<K: Hash + ?Sized>(key: &K, buckets: usize) -> usize {
    bucket_of_key(HASH_KIND_DEFAULT, key, buckets)
}
