//! Snapshot Adapter
//!
//! Locally published JSON documents, passed through after a shape check.

mod reader;

pub use reader::{SnapshotReader, SnapshotShape, KNOWN_SNAPSHOTS};
