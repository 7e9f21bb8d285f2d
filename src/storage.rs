//! Storage layer for tasktrack
//!
//! The whole project lives in one JSON document (`tasks.json` in the
//! current directory unless configured otherwise). Every command loads the
//! full document and every mutating command replaces the full file.
//!
//! There is no locking. Concurrent invocations against the same file race
//! and the last writer wins.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::project::Project;

/// Default document file name, relative to the working directory
pub const DOCUMENT_FILE: &str = "tasks.json";

/// Storage manager for the project document
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage for `tasks.json` inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DOCUMENT_FILE))
    }

    /// Path to the project document
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the project document.
    pub fn read(&self) -> Result<Project> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::DocumentNotFound(self.path.clone()));
            }
            Err(err) => return Err(Error::Io(err)),
        };

        let project: Project = serde_json::from_str(&content).map_err(|source| Error::Parse {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(
            path = %self.path.display(),
            tasks = project.tasks.len(),
            next_id = project.next_id,
            "loaded project document"
        );
        Ok(project)
    }

    /// Replace the project document with `project`.
    pub fn write(&self, project: &Project) -> Result<()> {
        self.write_json(project)?;
        tracing::debug!(
            path = %self.path.display(),
            tasks = project.tasks.len(),
            "wrote project document"
        );
        Ok(())
    }

    /// Raw bytes currently on disk, if any
    pub fn read_raw(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::Io(err)),
        }
    }

    // =========================================================================
    // File I/O helpers
    // =========================================================================

    fn write_json<T: Serialize>(&self, data: &T) -> Result<()> {
        let json = serde_json::to_string(data)?;
        write_atomic(&self.path, json.as_bytes())
    }
}

/// Write data using temp file + rename so readers never see a torn file.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    // Temp file lives next to the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let mut file = File::create(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;

    Ok(())
}
