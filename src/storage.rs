//! Storage subsystem
//!
//! Snapshots land in a date/camera bucket tree under the storage root:
//! `<root>/<YYYYMMDD>/<camera>/<YYYYMMDD_HHMMSS>_<camera>_snapshot.jpg`.
//!
//! Components:
//! - `paths`: bucketed path allocation and the shared timestamp formats.
//! - `writer`: persisting one fetched snapshot, with optional re-encode.
//! - `optimizer`: JPEG re-encoding at a configured quality.
//! - `retention`: the rotation policy over the bucket tree.

pub mod optimizer;
pub mod paths;
pub mod retention;
pub mod writer;

pub use paths::PathAllocator;
pub use retention::RetentionEngine;
pub use writer::SnapshotWriter;
