//! Size-rotated log file used when `log_file` is configured.
//!
//! When the file would grow past the size limit, it is shifted to `<name>.1`,
//! existing backups move up by one (`.1` → `.2`, ...), and anything beyond
//! the retention count is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;

/// Default size at which the log rotates (10 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of rotated backups kept next to the live file.
pub const MAX_BACKUP_FILES: usize = 3;

struct Inner {
    file: Option<File>,
    written: u64,
}

/// Append-only log file with size-based rotation.
///
/// Cheap to share: every `tracing` event takes the lock once and writes its
/// formatted line in one call.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    inner: Mutex<Inner>,
}

impl RotatingFile {
    /// Opens (or creates) `path` for appending, creating parent directories.
    ///
    /// # Errors
    ///
    /// Fails if the directory or file cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        Self::with_limit(path, MAX_FILE_SIZE_BYTES)
    }

    /// Like [`open`](Self::open) with a custom rotation threshold.
    ///
    /// # Errors
    ///
    /// Fails if the directory or file cannot be created.
    pub fn with_limit(path: impl Into<PathBuf>, max_bytes: u64) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = open_append(&path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            path,
            max_bytes: max_bytes.max(1),
            inner: Mutex::new(Inner {
                file: Some(file),
                written,
            }),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_bytes(&self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| io::Error::other(format!("log file lock poisoned: {e}")))?;

        if inner.written > 0 && inner.written + buf.len() as u64 > self.max_bytes {
            inner.file = None;
            self.rotate()?;
            inner.written = 0;
        }

        if inner.file.is_none() {
            inner.file = Some(open_append(&self.path)?);
        }
        let file = inner
            .file
            .as_mut()
            .ok_or_else(|| io::Error::other("log file unavailable"))?;
        file.write_all(buf)?;
        file.flush()?;
        inner.written += buf.len() as u64;
        drop(inner);

        Ok(buf.len())
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        let oldest = self.backup_path(MAX_BACKUP_FILES);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..MAX_BACKUP_FILES).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        if self.path.exists() {
            fs::rename(&self.path, self.backup_path(1))?;
        }
        Ok(())
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

impl Write for &RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for RotatingFile {
    type Writer = &'a Self;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}
