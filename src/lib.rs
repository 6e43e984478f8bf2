//! reosnap: periodically save live snapshots of Reolink camera feeds.
//!
//! The daemon fetches a JPEG from each configured camera over HTTP, writes it
//! into a date/camera bucket tree, optionally re-encodes it, and rotates the
//! oldest retained files once the retention budget is exceeded.

pub mod cameras;
pub mod configuration;
pub mod error_handling;
pub mod scheduler;
pub mod storage;
