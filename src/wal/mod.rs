//! Write-Ahead Log (WAL) Module
//!
//! Append-only record of every successful `set`, replayable into a fresh
//! table.
//!
//! ## Responsibilities
//! - Append one record per write, in a single table-wide order
//! - Never rewrite or compact existing lines
//! - Parse records back in file order for replay
//!
//! ## File Format
//! ```text
//! 5,100
//! 21,200
//! -7,3
//! ```
//! One ASCII `<key>,<value>` record per line, newline-terminated. Later
//! records for a key supersede earlier ones on replay.

mod reader;
mod record;
mod writer;

pub use reader::{WalReader, WalRecords};
pub use record::{LogRecord, ParseRecordError};
pub use writer::{WalWriter, LOG_FILENAME};
