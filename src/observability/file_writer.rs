//! Size-capped trace file with numbered backups.
//!
//! When the live file grows past its limit it becomes `<name>.1`, the old
//! `.1` becomes `.2`, and so on; the oldest backup past the retention count
//! is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Live file size that triggers rotation (10 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Backups kept after rotation.
pub const MAX_BACKUP_FILES: usize = 3;

/// Append-only line writer that rotates by size.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    /// Opened on first write.
    file: Mutex<Option<File>>,
}

impl RotatingFile {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub const fn with_limits(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            backups,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotating, opening or writing the file.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace file lock poisoned: {e}")))?;

        if self.is_full() {
            *guard = None;
            self.rotate()?;
        }

        let file = match guard.take() {
            Some(file) => file,
            None => OpenOptions::new().create(true).append(true).open(&self.path)?,
        };
        let file = guard.insert(file);

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn is_full(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|metadata| metadata.len() > self.max_bytes)
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return remove_if_exists(&self.path);
        }

        remove_if_exists(&self.backup_path(self.backups))?;
        for index in (1..self.backups).rev() {
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

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn appends_lines_creating_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingFile::new(path.clone());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(lines(&path), vec!["{\"a\":1}", "{\"b\":2}"]);
    }

    #[test]
    fn rotates_into_numbered_backups_and_drops_the_oldest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingFile::with_limits(path.clone(), 4, 2);

        for line in ["first", "second", "third", "fourth"] {
            writer.write_line(line).unwrap();
        }

        assert_eq!(lines(&path), vec!["fourth"]);
        assert_eq!(lines(&dir.path().join("trace.json.1")), vec!["third"]);
        assert_eq!(lines(&dir.path().join("trace.json.2")), vec!["second"]);
        assert!(!dir.path().join("trace.json.3").exists());
    }
}
