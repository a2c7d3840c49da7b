//! Test helpers shared across crates.
//!
//! This crate provides registry fixtures and a disposable workspace for
//! exercising the generate-and-verify cycle against real files.

pub mod fixtures;
pub mod workspace;

pub use workspace::TempWorkspace;
