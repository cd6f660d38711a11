//! Disk store for route documents.
//!
//! One file per (from, to) pair, named from the two stop ids. A file's
//! presence means the pair is done; batch runs use that to resume.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::StopId;

use super::document::RouteDocument;
use super::error::OutputError;

/// Extension of every route document file.
const EXTENSION: &str = "json";

/// Directory of route documents keyed by stop pair.
#[derive(Debug, Clone)]
pub struct OutputStore {
    dir: PathBuf,
}

impl OutputStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a pair, e.g. `100-400.json`.
    ///
    /// The separator keeps pairs like (1, 23) and (12, 3) apart.
    pub fn file_name(from: StopId, to: StopId) -> String {
        format!("{from}-{to}.{EXTENSION}")
    }

    pub fn path_for(&self, from: StopId, to: StopId) -> PathBuf {
        self.dir.join(Self::file_name(from, to))
    }

    /// Whether a document for the pair has already been written.
    pub fn exists(&self, from: StopId, to: StopId) -> bool {
        self.path_for(from, to).is_file()
    }

    /// Create the output directory if it doesn't exist.
    pub fn ensure_dir(&self) -> Result<(), OutputError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| OutputError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }

    /// Write a document for its pair, replacing any existing file.
    ///
    /// The document is written to a temporary file in the same directory
    /// and renamed into place, so readers see either no file or a
    /// complete one.
    pub fn write(&self, document: &RouteDocument) -> Result<PathBuf, OutputError> {
        let path = self.path_for(document.from_stop.stop_id, document.to_stop.stop_id);
        let mut json = serde_json::to_vec_pretty(document)?;
        json.push(b'\n');

        self.ensure_dir()?;
        let write_err = |source| OutputError::Write {
            path: path.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        tmp.write_all(&json).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&path).map_err(|e| write_err(e.error))?;

        Ok(path)
    }
}
