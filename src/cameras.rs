//! Camera endpoints and snapshot fetching.
//!
//! Components:
//! - `registry`: the line-oriented credential file and camera numbering.
//! - `fetcher`: the `SnapshotFetcher` boundary and its HTTP implementation.

pub mod fetcher;
pub mod registry;

pub use fetcher::{HttpSnapshotFetcher, SnapshotFetcher};
pub use registry::{Camera, CameraRegistry};
