//! Hash key to bucket storage

use std::collections::HashMap;
use std::hash::{BuildHasherDefault, Hasher};

use crate::spatial::bucket::Bucket;

/// Canonical bucket identifier produced by the coordinate hash
pub type HashKey = i32;

/// Map from hash key to bucket
pub type CellIndex<V> = HashMap<HashKey, Bucket<V>, BuildHasherDefault<KeyHasher>>;

/// Golden-ratio multiplier spreading 32-bit keys over 64 bits
const SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

/// Hasher for keys that are already well mixed
///
/// Keys come out of the coordinate hash, so they only need widening: a
/// single multiply fills the high bits the table uses for its control bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyHasher {
    state: u64,
}

impl Hasher for KeyHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state = (self.state.rotate_left(8) ^ u64::from(byte)).wrapping_mul(SPREAD);
        }
    }

    fn write_i32(&mut self, key: i32) {
        self.state = u64::from(key.cast_unsigned()).wrapping_mul(SPREAD);
    }
}

/// Create an empty index with room for `capacity` occupied cells
pub fn with_capacity<V>(capacity: usize) -> CellIndex<V> {
    CellIndex::with_capacity_and_hasher(capacity, BuildHasherDefault::default())
}
