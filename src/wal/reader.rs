//! WAL Reader
//!
//! Loads a log file and parses its records in file order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, TableError};
use super::LogRecord;

/// An in-memory snapshot of a log file
///
/// The whole file is read on `open`, so the source may be deleted (for
/// example by wiping the directory that contains it) before replay.
#[derive(Debug)]
pub struct WalReader {
    path: PathBuf,
    contents: String,
}

impl WalReader {
    /// Read a log file, failing with `LogNotFound` if it does not exist
    pub fn open(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(TableError::LogNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            contents,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records in file order
    ///
    /// Blank lines are skipped and surrounding whitespace is ignored. Any
    /// other line that does not parse yields `InvalidLogFormat` with its
    /// 1-based line number.
    pub fn records(&self) -> WalRecords<'_> {
        WalRecords {
            lines: self.contents.lines().enumerate(),
        }
    }
}

/// Iterator over the records of a [`WalReader`]
pub struct WalRecords<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl Iterator for WalRecords<'_> {
    type Item = Result<LogRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, line) in self.lines.by_ref() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            return Some(line.parse().map_err(|_| TableError::InvalidLogFormat {
                line: index + 1,
                content: line.to_string(),
            }));
        }
        None
    }
}
