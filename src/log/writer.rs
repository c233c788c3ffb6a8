use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::types::record::{LOG_HEADER, LogRecord};

/// Append-only writer for the capture log.
///
/// Wraps a single open append-mode file handle. Every [`write`](Self::write)
/// appends one row and flushes synchronously before returning: a crash must
/// not silently drop the most recent frame, so durability wins over
/// throughput. Single-writer discipline is the caller's responsibility (the
/// capture session never opens two writers on the same file).
pub struct RecordWriter {
    file: File,
    path: PathBuf,
}

impl RecordWriter {
    /// Opens `path` in append mode, creating the file when missing.
    ///
    /// When the file was empty prior to opening (or newly created), the
    /// six-column header row is written and flushed first. The size check
    /// happens once here, never per write, so reopening a populated log
    /// appends below the existing content without a duplicate header.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).create(true).open(path)?;
        let mut writer = RecordWriter {
            file,
            path: path.to_path_buf(),
        };
        if writer.file.metadata()?.len() == 0 {
            writer.write_line(LOG_HEADER)?;
        }
        Ok(writer)
    }

    /// Appends one record row and flushes it to disk.
    pub fn write(&mut self, record: &LogRecord) -> io::Result<()> {
        self.write_line(&record.to_row())
    }

    /// Path of the underlying log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.file.flush()
    }
}
