//! Bucket Store
//!
//! Reads and writes whole bucket files. Holds no state beyond the table
//! directory; callers serialize access through the [`LockRegistry`].
//!
//! [`LockRegistry`]: super::LockRegistry

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// File extension for bucket files
pub const BUCKET_EXTENSION: &str = "json";

/// In-memory image of one bucket file
///
/// Serializes as a flat JSON object; serde_json writes the integer keys as
/// decimal strings and rejects any non-integer key or value on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bucket {
    entries: BTreeMap<i64, i64>,
}

impl Bucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: i64) -> Option<i64> {
        self.entries.get(&key).copied()
    }

    /// Insert or overwrite, returning the previous value
    pub fn insert(&mut self, key: i64, value: i64) -> Option<i64> {
        self.entries.insert(key, value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }
}

/// Maps shard ids to bucket files under a table directory
#[derive(Debug, Clone)]
pub struct BucketStore {
    dir: PathBuf,
}

impl BucketStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the bucket file for `shard_id`, creating it with an empty map
    /// if it does not exist yet
    ///
    /// Call with the shard lock held. `create_new` keeps a racing first
    /// reference from truncating a bucket another writer just filled.
    pub fn path_for(&self, shard_id: &str) -> Result<PathBuf> {
        let path = self
            .dir
            .join(format!("{}.{}", shard_id, BUCKET_EXTENSION));

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => {
                write_bucket(file, &Bucket::new())?;
                tracing::debug!(shard = shard_id, path = %path.display(), "materialized bucket");
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(e.into()),
        }

        Ok(path)
    }

    /// Parse a bucket file
    pub fn load(path: &Path) -> Result<Bucket> {
        let data = fs::read(path)?;
        serde_json::from_slice(&data).map_err(|source| TableError::CorruptBucket {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overwrite a bucket file with the full contents of `bucket`
    pub fn store(path: &Path, bucket: &Bucket) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        write_bucket(file, bucket)
    }

    /// All materialized bucket files, sorted by name
    pub fn bucket_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(BUCKET_EXTENSION)
            {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

fn write_bucket(file: File, bucket: &Bucket) -> Result<()> {
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, bucket).map_err(io::Error::from)?;
    writer.flush()?;
    Ok(())
}
