//! Snapshot Reader
//!
//! Reads JSON documents dropped into the snapshot directory by the
//! collector process (`status.json`, `task.json`, `feed.json`, ...).
//!
//! Documents pass through untouched. List snapshots must be arrays; the
//! status document is served in whatever shape the collector wrote it.
//!
//! Fails closed: a missing, unreadable or malformed document, or a list
//! snapshot that is not an array, reads as an empty list. Callers cannot
//! tell "not published yet" from "empty"; both mean "no data yet".

use std::path::{Path, PathBuf};
use serde_json::Value;
use tracing::{debug, warn};

use crate::adapters::shape::{expect_array, kind_of};
use crate::ports::FetchErrorKind;

pub const SOURCE_NAME: &str = "snapshot";

/// Snapshot documents published by the collector
pub const KNOWN_SNAPSHOTS: [&str; 3] = ["status", "task", "feed"];

/// Shape a snapshot document must have to be served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotShape {
    /// A JSON array of items
    Array,
    /// Any JSON document
    Any,
}

impl SnapshotShape {
    /// Expected shape for a snapshot name; unknown names are lists
    pub fn for_name(name: &str) -> Self {
        match name {
            "status" => SnapshotShape::Any,
            _ => SnapshotShape::Array,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotReader {
    dir: PathBuf,
}

impl SnapshotReader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read a snapshot document; never fails
    pub async fn read_snapshot(&self, name: &str) -> Value {
        match self.try_read(name).await {
            Ok(document) => {
                debug!(source = SOURCE_NAME, name, kind = kind_of(&document), "Snapshot read");
                document
            }
            Err(e) => {
                warn!(source = SOURCE_NAME, name, error = %e, "Snapshot unavailable, serving empty");
                Value::Array(Vec::new())
            }
        }
    }

    async fn try_read(&self, name: &str) -> Result<Value, FetchErrorKind> {
        let path = self.path_for(name)?;

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| FetchErrorKind::Transport(format!("{}: {}", path.display(), e)))?;
        let document: Value =
            serde_json::from_str(&content).map_err(|e| FetchErrorKind::Parse(format!("{}: {}", path.display(), e)))?;

        if SnapshotShape::for_name(name) == SnapshotShape::Array {
            expect_array(&document)?;
        }
        Ok(document)
    }

    /// Resolve a snapshot name to a file inside the snapshot directory
    fn path_for(&self, name: &str) -> Result<PathBuf, FetchErrorKind> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(FetchErrorKind::Parse(format!("invalid snapshot name '{}'", name)));
        }

        Ok(self.dir.join(format!("{}.json", name)))
    }
}
