//! Library interface for `flaggen`.
//!
//! `flaggen` derives two source files from a feature flag registry: a
//! TypeScript interface declaring one optional boolean per flag and a Go file
//! with one `Is<Flag>Enabled` accessor per flag. The [`check`] routines
//! compare freshly generated output with the checked-in copies, rewrite any
//! stale file and report the drift so it is reviewed.
//!
//! ```no_run
//! use flaggen::check::{check_accessors, check_interface};
//! use flaggen::config::FlaggenConfig;
//! use flaggen::registry::Registry;
//!
//! let config = FlaggenConfig::default();
//! let registry = Registry::load(&config.registry_path())?;
//! check_interface(&registry, &config)?;
//! check_accessors(&registry, &config)?;
//! # Ok::<(), flaggen::error::FlaggenError>(())
//! ```

pub mod accessor;
pub mod artifact;
pub mod check;
pub mod config;
pub mod error;
pub mod fs_helpers;
pub mod ident;
pub mod reconcile;
pub mod registry;
pub mod typescript;
