//! Configuration for BucketKV
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Smallest accepted bucket magnitude (16 shards)
pub const MIN_BUCKET_MAGNITUDE: u32 = 1;

/// Largest accepted bucket magnitude; 16^15 = 2^60 still fits in an i64
pub const MAX_BUCKET_MAGNITUDE: u32 = 15;

/// Default bucket magnitude (16^3 = 4096 shards)
pub const DEFAULT_BUCKET_MAGNITUDE: u32 = 3;

/// Main configuration for a table
#[derive(Debug, Clone)]
pub struct TableConfig {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Storage root for the table
    /// Internal structure:
    ///   {table_dir}/
    ///     ├── log.txt          (write-ahead log, when enabled)
    ///     └── <shard>.json     (one file per referenced shard)
    pub table_dir: PathBuf,

    /// Shard count is 16^bucket_magnitude
    pub bucket_magnitude: u32,

    // -------------------------------------------------------------------------
    // WAL Configuration
    // -------------------------------------------------------------------------
    /// Append every successful `set` to `{table_dir}/log.txt`
    pub log_enabled: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            table_dir: PathBuf::from("./bucketkv_data"),
            bucket_magnitude: DEFAULT_BUCKET_MAGNITUDE,
            log_enabled: true,
        }
    }
}

impl TableConfig {
    /// Create a new config builder
    pub fn builder() -> TableConfigBuilder {
        TableConfigBuilder::default()
    }
}

/// Builder for TableConfig
#[derive(Default)]
pub struct TableConfigBuilder {
    config: TableConfig,
}

impl TableConfigBuilder {
    /// Set the table directory
    pub fn table_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.table_dir = path.into();
        self
    }

    /// Set the bucket magnitude (validated when the table is opened)
    pub fn bucket_magnitude(mut self, magnitude: u32) -> Self {
        self.config.bucket_magnitude = magnitude;
        self
    }

    /// Enable or disable the write-ahead log
    pub fn log_enabled(mut self, enabled: bool) -> Self {
        self.config.log_enabled = enabled;
        self
    }

    pub fn build(self) -> TableConfig {
        self.config
    }
}
