//! Table Module
//!
//! The persistent hash table that coordinates all components.
//!
//! ## Responsibilities
//! - Route keys to shards and serialize access per shard
//! - Persist each write to its bucket file, then to the WAL
//! - Rebuild a new table from an existing log by replaying it

use std::fs;
use std::path::{Path, PathBuf};

use crate::bucket::{BucketStore, LockRegistry};
use crate::config::TableConfig;
use crate::error::Result;
use crate::shard::Sharder;
use crate::wal::{LogRecord, WalReader, WalWriter, LOG_FILENAME};
use crate::TableError;

/// Outcome of rebuilding a table from a log
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayResult {
    /// Number of records applied through `set`
    pub records_replayed: u64,
}

/// A persistent hash table of `i64` keys and values
///
/// ## Concurrency Model: Per-Shard Locking
///
/// - **get / set**: acquire the key's shard lock for the whole
///   load → (mutate → store → log) sequence. Operations on the same shard
///   are fully serialized; operations on different shards run in parallel.
///
/// - **WAL**: appends are serialized by one table-wide lock, giving a
///   single total order across shards. The append happens while the
///   shard lock is still held.
///
/// The bucket write and the log append are two separate writes. A crash
/// between them leaves the bucket ahead of the log, and a failed append
/// leaves the log behind the bucket. Neither is repaired automatically.
pub struct Table {
    /// Table configuration
    config: TableConfig,

    /// Key → shard id policy
    sharder: Sharder,

    /// Bucket file I/O under `table_dir`
    buckets: BucketStore,

    /// One lock per shard id
    locks: LockRegistry,

    /// Write-ahead log, if enabled
    wal: Option<WalWriter>,
}

impl Table {
    /// Open or create a table with the given config
    ///
    /// On open:
    /// 1. Validate the bucket magnitude
    /// 2. Create the table directory if needed
    /// 3. Create the log file if logging is enabled (never truncated)
    ///
    /// Existing bucket files are used as-is, so reopening a directory
    /// resumes the table in place.
    pub fn open(config: TableConfig) -> Result<Self> {
        let sharder = Sharder::new(config.bucket_magnitude)?;

        fs::create_dir_all(&config.table_dir)?;

        let wal = if config.log_enabled {
            Some(WalWriter::open(&config.table_dir.join(LOG_FILENAME))?)
        } else {
            None
        };

        tracing::info!(
            dir = %config.table_dir.display(),
            bucket_magnitude = config.bucket_magnitude,
            log_enabled = config.log_enabled,
            "opened table"
        );

        Ok(Self {
            buckets: BucketStore::new(&config.table_dir),
            config,
            sharder,
            locks: LockRegistry::new(),
            wal,
        })
    }

    /// Open with explicit parameters
    pub fn new(table_dir: impl Into<PathBuf>, enable_log: bool, bucket_magnitude: u32) -> Result<Self> {
        let config = TableConfig::builder()
            .table_dir(table_dir)
            .log_enabled(enable_log)
            .bucket_magnitude(bucket_magnitude)
            .build();
        Self::open(config)
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified table directory
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(TableConfig::builder().table_dir(path).build())
    }

    /// Build a new table in `table_dir` by replaying the log at `log_path`
    ///
    /// See [`Table::replay_log`] for the steps and failure behavior.
    pub fn from_log(log_path: &Path, table_dir: &Path, bucket_magnitude: u32) -> Result<Self> {
        Self::replay_log(log_path, table_dir, bucket_magnitude).map(|(table, _)| table)
    }

    /// Like `from_log`, also reporting how many records were replayed
    ///
    /// Steps:
    /// 1. Read the whole source log (`LogNotFound` if missing)
    /// 2. Validate the bucket magnitude; nothing is touched on failure
    /// 3. Wipe `table_dir` if it exists and recreate it with a fresh log
    /// 4. Replay every record through `set`, in file order
    ///
    /// A malformed line aborts with `InvalidLogFormat`. Records replayed
    /// before it stay on disk, so the directory should be discarded after
    /// a failed rebuild.
    pub fn replay_log(
        log_path: &Path,
        table_dir: &Path,
        bucket_magnitude: u32,
    ) -> Result<(Self, ReplayResult)> {
        let reader = WalReader::open(log_path)?;
        Sharder::new(bucket_magnitude)?;

        if table_dir.exists() {
            tracing::warn!(dir = %table_dir.display(), "wiping existing table directory before replay");
            fs::remove_dir_all(table_dir)?;
        }

        let table = Self::new(table_dir, true, bucket_magnitude)?;

        let mut result = ReplayResult::default();
        for record in reader.records() {
            let record = record?;
            table.set(record.key, record.value)?;
            result.records_replayed += 1;
        }

        tracing::info!(
            source = %reader.path().display(),
            dir = %table_dir.display(),
            records = result.records_replayed,
            "replayed log"
        );

        Ok((table, result))
    }

    /// Get the value stored for `key`
    ///
    /// Fails with `KeyNotFound` if the key was never written. Reads are not
    /// logged.
    pub fn get(&self, key: i64) -> Result<i64> {
        let shard_id = self.sharder.shard_id(key);
        let lock = self.locks.lock_for(&shard_id);
        let _guard = lock.lock();

        let path = self.buckets.path_for(&shard_id)?;
        let bucket = BucketStore::load(&path)?;
        bucket.get(key).ok_or(TableError::KeyNotFound(key))
    }

    /// Insert or overwrite `key`
    ///
    /// Steps (all under the shard lock):
    /// 1. Load the bucket
    /// 2. Insert the entry and rewrite the bucket file
    /// 3. Append the record to the WAL, if enabled
    pub fn set(&self, key: i64, value: i64) -> Result<()> {
        let shard_id = self.sharder.shard_id(key);
        let lock = self.locks.lock_for(&shard_id);
        let _guard = lock.lock();

        let path = self.buckets.path_for(&shard_id)?;
        let mut bucket = BucketStore::load(&path)?;
        bucket.insert(key, value);
        BucketStore::store(&path, &bucket)?;

        if let Some(wal) = &self.wal {
            wal.append(LogRecord::new(key, value))?;
        }

        tracing::debug!(key, value, shard = %shard_id, "set");
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Location of the WAL, for a later `from_log`; `None` when disabled
    pub fn log_file_path(&self) -> Option<&Path> {
        self.wal.as_ref().map(WalWriter::path)
    }

    pub fn table_dir(&self) -> &Path {
        &self.config.table_dir
    }

    pub fn bucket_magnitude(&self) -> u32 {
        self.sharder.magnitude()
    }

    /// Number of possible shards (16^m)
    pub fn shard_count(&self) -> u64 {
        self.sharder.shard_count()
    }

    /// Shard id `key` routes to
    pub fn shard_for(&self, key: i64) -> String {
        self.sharder.shard_id(key)
    }

    /// Bucket files materialized so far
    pub fn bucket_files(&self) -> Result<Vec<PathBuf>> {
        self.buckets.bucket_files()
    }

}
