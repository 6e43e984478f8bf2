//! Configuration subsystem
//!
//! Everything the daemon needs is parsed and validated exactly once at
//! startup into an immutable [`config::Config`]; no component re-reads the
//! command line afterwards.
//!
//! Components:
//! - `config`: the clap argument surface and the validated `Config`.
//! - `resolution`: resolution and quality tier tables.

pub mod config;
pub mod resolution;

pub use config::{Args, Config};
pub use resolution::{QualityPolicy, Resolution, ResolutionPolicy};
