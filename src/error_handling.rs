//! Typed errors shared across the crate.

pub mod types;
