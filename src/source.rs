use std::time::Duration;

use anyhow::Result;

use crate::model::Snapshot;

mod file;
mod http_client;

pub use self::file::FileSource;
pub use self::http_client::{CACHE_BUST_PARAM, HttpSource};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("server returned HTTP {0}")]
    Status(u16),

    #[error("malformed snapshot: {0}")]
    Malformed(String),

    #[error("read {path}: {message}")]
    Io { path: String, message: String },
}

/// Where snapshots come from. Implementations block until the fetch resolves.
pub trait SnapshotSource: Send + Sync {
    fn fetch(&self) -> Result<Snapshot, FetchError>;

    fn describe(&self) -> String;
}

/// `http://` and `https://` locations fetch over HTTP; anything else is a file path.
pub fn source_for(location: &str, timeout: Duration) -> Result<Box<dyn SnapshotSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, timeout)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;
