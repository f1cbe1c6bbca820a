//! Sharder
//!
//! Maps integer keys onto a bounded namespace of 16^m shard ids.
//!
//! The policy is a plain modulus rendered in base 16: `key mod 16^m`.
//! It is not a mixing hash. Keys that share their low-order bits land in
//! the same shard, so strided key patterns can leave shards imbalanced.
//!
//! Negative keys use Euclidean remainder, so every shard id is in
//! `0..16^m` and `-1` maps to the last shard.

use crate::config::{MAX_BUCKET_MAGNITUDE, MIN_BUCKET_MAGNITUDE};
use crate::error::{Result, TableError};

/// Deterministic key → shard id mapping
#[derive(Debug, Clone, Copy)]
pub struct Sharder {
    magnitude: u32,
    modulus: i64,
}

impl Sharder {
    /// Create a sharder for 16^magnitude shards
    pub fn new(magnitude: u32) -> Result<Self> {
        if !(MIN_BUCKET_MAGNITUDE..=MAX_BUCKET_MAGNITUDE).contains(&magnitude) {
            return Err(TableError::Config(format!(
                "bucket magnitude must be in {}..={}, got {}",
                MIN_BUCKET_MAGNITUDE, MAX_BUCKET_MAGNITUDE, magnitude
            )));
        }

        Ok(Self {
            magnitude,
            modulus: 1i64 << (4 * magnitude),
        })
    }

    /// Shard id for a key: lowercase hex of `key.rem_euclid(16^m)`, unpadded
    pub fn shard_id(&self, key: i64) -> String {
        format!("{:x}", key.rem_euclid(self.modulus))
    }

    pub fn magnitude(&self) -> u32 {
        self.magnitude
    }

    /// Number of distinct shard ids (16^m)
    pub fn shard_count(&self) -> u64 {
        self.modulus as u64
    }
}
