//! WAL Writer
//!
//! Appends records to the log file.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::Result;
use super::LogRecord;

/// Log file name inside a table directory
pub const LOG_FILENAME: &str = "log.txt";

/// Appends records to a log file
///
/// Every append reopens the file in append mode, writes one line and
/// flushes before returning; nothing is buffered across calls. A single
/// mutex orders appends from all shards into one total order.
#[derive(Debug)]
pub struct WalWriter {
    path: PathBuf,
    lock: Mutex<()>,
}

impl WalWriter {
    /// Open or create a log file without truncating existing records
    pub fn open(path: &Path) -> Result<Self> {
        OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            lock: Mutex::new(()),
        })
    }

    /// Append one `<key>,<value>` line
    pub fn append(&self, record: LogRecord) -> Result<()> {
        let _guard = self.lock.lock();
        let mut file = self.open_append()?;
        writeln!(file, "{}", record)?;
        file.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_append(&self) -> Result<File> {
        Ok(OpenOptions::new().append(true).open(&self.path)?)
    }
}
