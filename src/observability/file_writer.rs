//! Size-rotated append-only file.
//!
//! Lines are appended to the active file. Once it grows past the policy's
//! size limit, backups shift up by one (`trace.json.1` becomes
//! `trace.json.2`, ...), the active file becomes `trace.json.1`, and anything
//! past `max_backups` is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// When to rotate and how many rotated files to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    /// 10 MiB per file, 3 backups.
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_backups: 3,
        }
    }
}

struct Active {
    file: File,
    written: u64,
}

/// Thread-safe rotating line writer. The file is opened lazily.
pub struct RotatingFile {
    path: PathBuf,
    policy: RotationPolicy,
    active: Mutex<Option<Active>>,
}

impl RotatingFile {
    #[must_use]
    pub const fn new(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            active: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// The active file is opened on first use and reopened after a rotation.
    /// Each line is flushed before returning, so a crash loses at most the
    /// line being written.
    ///
    /// # Parameters
    ///
    /// * `line` - One serialized record, without a trailing newline
    ///
    /// # Returns
    ///
    /// `Ok(())` once the line is on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if rotating, opening or writing the file fails. A
    /// failed open is retried on the next call.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);

        if active
            .as_ref()
            .is_some_and(|current| current.written >= self.policy.max_bytes)
        {
            *active = None;
            self.rotate()?;
        }

        let current = match active.take() {
            Some(current) => current,
            None => self.open()?,
        };
        let current = active.insert(current);

        writeln!(current.file, "{line}")?;
        current.file.flush()?;
        current.written += line.len() as u64 + 1;
        Ok(())
    }

    fn open(&self) -> io::Result<Active> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let written = file.metadata()?.len();
        if written >= self.policy.max_bytes {
            drop(file);
            self.rotate()?;
            return self.open_fresh();
        }
        Ok(Active { file, written })
    }

    fn open_fresh(&self) -> io::Result<Active> {
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        Ok(Active { file, written: 0 })
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.policy.max_backups == 0 {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
                _ => Ok(()),
            };
        }

        let oldest = self.backup_path(self.policy.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.policy.max_backups).rev() {
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

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
