//! Bucket Module
//!
//! Disk-resident shards of the key space.
//!
//! ## Responsibilities
//! - Materialize a valid (empty) bucket file on first reference
//! - Load and store a bucket's full key → value map as one unit
//! - Hand out one shared lock per shard id
//!
//! ## File Format
//! One JSON object per bucket file, keyed by the decimal form of the key:
//! ```text
//! {table_dir}/3e8.json
//! {"1000":7,"-3096":42}
//! ```
//!
//! Every write rewrites the whole file. Buckets stay small because the key
//! space is spread over 16^m files.

mod registry;
mod store;

pub use registry::LockRegistry;
pub use store::{Bucket, BucketStore, BUCKET_EXTENSION};
