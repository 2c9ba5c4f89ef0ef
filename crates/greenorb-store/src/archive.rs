//! The processed-files area

use crate::error::StoreError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory holding source files that were fully handled
///
/// A file's presence here is the durable "already processed" marker.
#[derive(Debug, Clone)]
pub struct ProcessedArchive {
    dir: PathBuf,
}

impl ProcessedArchive {
    /// Create an archive rooted at `dir` (created on first archive)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// True if a file called `file_name` was already archived
    pub fn contains(&self, file_name: &str) -> bool {
        self.dir.join(file_name).is_file()
    }

    /// Move `source` into the archive, returning its new path
    ///
    /// Falls back to copy-and-remove when a rename is not possible,
    /// e.g. across filesystems.
    pub fn archive(&self, source: &Path) -> Result<PathBuf, StoreError> {
        let file_name = source
            .file_name()
            .ok_or_else(|| StoreError::NotAFile(source.to_path_buf()))?;

        fs::create_dir_all(&self.dir)?;
        let destination = self.dir.join(file_name);

        if let Err(e) = fs::rename(source, &destination) {
            debug!("rename failed ({}), copying {}", e, source.display());
            fs::copy(source, &destination)?;
            fs::remove_file(source)?;
        }

        Ok(destination)
    }

    /// Files directly under `source_dir` still waiting to be processed
    ///
    /// Only files whose extension matches one of `extensions`
    /// (case-insensitive) are listed, sorted by name. A missing directory
    /// has an empty backlog.
    pub fn backlog(&self, source_dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, StoreError> {
        if !source_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut pending = Vec::new();
        for entry in fs::read_dir(source_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            let matches_ext = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
                .unwrap_or(false);
            if !matches_ext {
                continue;
            }

            let already_done = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| self.contains(name))
                .unwrap_or(false);
            if already_done {
                debug!("Skipping {}: already processed", path.display());
                continue;
            }

            pending.push(path);
        }

        pending.sort();
        Ok(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exts() -> Vec<String> {
        vec!["pdf".to_string(), "txt".to_string()]
    }

    #[test]
    fn test_archive_moves_file() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("acme.pdf");
        fs::write(&source, b"%PDF").unwrap();

        let archive = ProcessedArchive::new(tmp.path().join("Processed"));
        let destination = archive.archive(&source).unwrap();

        assert!(!source.exists());
        assert!(destination.is_file());
        assert!(archive.contains("acme.pdf"));
    }

    #[test]
    fn test_archive_missing_source_fails() {
        let tmp = TempDir::new().unwrap();
        let archive = ProcessedArchive::new(tmp.path().join("Processed"));
        assert!(archive.archive(&tmp.path().join("nope.pdf")).is_err());
    }

    #[test]
    fn test_backlog_filters_and_sorts() {
        let tmp = TempDir::new().unwrap();
        for name in ["b.pdf", "a.TXT", "c.docx", "d.pdf"] {
            fs::write(tmp.path().join(name), b"x").unwrap();
        }
        fs::create_dir(tmp.path().join("nested.pdf")).unwrap();

        let archive = ProcessedArchive::new(tmp.path().join("Processed"));
        fs::create_dir(archive.dir()).unwrap();
        fs::write(archive.dir().join("d.pdf"), b"x").unwrap();

        let backlog = archive.backlog(tmp.path(), &exts()).unwrap();
        let names: Vec<_> = backlog
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.TXT", "b.pdf"]);
    }

    #[test]
    fn test_backlog_of_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let archive = ProcessedArchive::new(tmp.path().join("Processed"));
        assert!(archive.backlog(&tmp.path().join("absent"), &exts()).unwrap().is_empty());
    }
}
