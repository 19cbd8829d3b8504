//! # Formats
//!
//! Serialization formats owned by the core. File I/O lives in the app layer;
//! everything here is a pure bytes-in/bytes-out transformation.

pub mod snapshot;

pub use snapshot::{HerdSnapshot, SnapshotHeader, snapshot_from_bytes, snapshot_to_bytes};
