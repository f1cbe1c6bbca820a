//! # BucketKV
//!
//! A persistent hash table of integer keys and values with:
//! - Sharding across 16^m JSON bucket files
//! - A write-ahead log (WAL) that can rebuild a table from scratch
//! - Per-shard locking: one shard serialized, different shards in parallel
//!
//! ## Architecture Overview
//!
//! ```text
//!                 get(k) / set(k, v)
//!                        │
//!              ┌─────────▼─────────┐
//!              │      Sharder      │  k mod 16^m → "3e8"
//!              └─────────┬─────────┘
//!                        │
//!              ┌─────────▼─────────┐
//!              │   Lock Registry   │  one Mutex per shard id
//!              └─────────┬─────────┘
//!                        │ (shard lock held)
//!          ┌─────────────┴─────────────┐
//!          ▼                           ▼
//!   ┌─────────────┐            ┌──────────────┐
//!   │ Bucket Store│            │     WAL      │
//!   │ 3e8.json ...│            │   log.txt    │
//!   └─────────────┘            └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use bucketkv::Table;
//!
//! fn main() -> bucketkv::Result<()> {
//!     let table = Table::new("./data", true, 2)?;
//!     table.set(5, 100)?;
//!     assert_eq!(table.get(5)?, 100);
//!
//!     let log = table.log_file_path().unwrap().to_path_buf();
//!     let copy = Table::from_log(&log, "./data-copy".as_ref(), 2)?;
//!     assert_eq!(copy.get(5)?, 100);
//!     Ok(())
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod shard;
pub mod bucket;
pub mod wal;
pub mod table;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{TableError, Result};
pub use config::TableConfig;
pub use table::{ReplayResult, Table};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of BucketKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
