//! Rotating log file with size-based rotation and backup retention.
//!
//! The TUI owns the terminal, so log output goes to a file instead. The file
//! rotates once it grows past a size threshold, keeping a fixed number of
//! numbered backups: `kvexplorer.log.1` is the newest, higher numbers are
//! older.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::fmt::MakeWriter;

/// Maximum file size before rotation (10 MiB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// The file is opened lazily on the first write. Writes from several threads
/// are serialized by an internal mutex, so each formatted event lands intact.
pub struct FileWriter {
    /// Path to the primary log file.
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    file: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer with the default 10 MiB / 3 backups policy.
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            file: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Appends `buf`, rotating first if the file is over the size limit.
    ///
    /// # Errors
    ///
    /// Fails on filesystem errors or if another writer panicked mid-write.
    pub fn write_bytes(&self, buf: &[u8]) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::other(format!("Mutex poisoned: {e}")))?;

        if fs::metadata(&self.file_path).is_ok_and(|m| m.len() > self.max_bytes) {
            *file = None;
            self.rotate_files()?;
        }

        if file.is_none() {
            *file = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            );
        }

        let handle = file
            .as_mut()
            .ok_or_else(|| io::Error::other("No file available"))?;
        handle.write_all(buf)?;
        handle.flush()
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.file_path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    /// Shifts `log.N-1 → log.N … log → log.1`, dropping the oldest backup.
    fn rotate_files(&self) -> io::Result<()> {
        if self.max_backups == 0 {
            return fs::remove_file(&self.file_path);
        }

        let oldest = self.backup_path(self.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.max_backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        if self.file_path.exists() {
            fs::rename(&self.file_path, self.backup_path(1))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

/// Per-event handle handed out to the fmt layer.
#[derive(Debug)]
pub struct FileWriterHandle<'a>(&'a FileWriter);

impl Write for FileWriterHandle<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for FileWriter {
    type Writer = FileWriterHandle<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        FileWriterHandle(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn appends_lines() {
        let dir = TempDir::new().unwrap();
        let writer = FileWriter::new(dir.path().join("app.log"));
        writer.write_bytes(b"one\n").unwrap();
        writer.make_writer().write_all(b"two\n").unwrap();
        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn rotates_and_keeps_limited_backups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let writer = FileWriter::with_limits(path.clone(), 4, 2);

        for line in ["aaaaa", "bbbbb", "ccccc", "ddddd"] {
            writer.write_bytes(line.as_bytes()).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "ddddd");
        assert_eq!(fs::read_to_string(dir.path().join("app.log.1")).unwrap(), "ccccc");
        assert_eq!(fs::read_to_string(dir.path().join("app.log.2")).unwrap(), "bbbbb");
        assert!(!dir.path().join("app.log.3").exists());
    }
}
