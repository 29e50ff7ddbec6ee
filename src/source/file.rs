use std::path::PathBuf;

use super::{FetchError, SnapshotSource};
use crate::model::Snapshot;

/// Reads a snapshot straight from disk, e.g. a collector's `docs/data.json`.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotSource for FileSource {
    fn fetch(&self) -> Result<Snapshot, FetchError> {
        let bytes = std::fs::read(&self.path).map_err(|err| FetchError::Io {
            path: self.path.display().to_string(),
            message: err.to_string(),
        })?;
        Snapshot::from_slice(&bytes).map_err(|err| FetchError::Malformed(err.to_string()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
