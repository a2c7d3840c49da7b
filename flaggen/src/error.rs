//! Error types for `flaggen`.
//!
//! Each stage of the pipeline owns a focused error type. [`FlaggenError`]
//! aggregates them so the check routines and the binary can propagate any
//! failure with `?`.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::accessor::{RenderError, TemplateError};
use crate::reconcile::DriftError;
use crate::registry::RegistryError;

/// Errors surfaced by the `flaggen` pipeline.
#[derive(Debug, Error)]
pub enum FlaggenError {
    /// The registry violated a record precondition.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The registry file could not be parsed.
    #[error("failed to parse registry {path}: {source}")]
    RegistryParse {
        /// Registry file that failed to parse.
        path: Utf8PathBuf,
        /// Underlying TOML error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// The accessor template could not be compiled.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A record could not be rendered into the accessor output.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A generated artifact did not match its checked-in copy.
    #[error(transparent)]
    Drift(#[from] DriftError),

    /// Configuration layers could not be merged or extracted.
    #[error("failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// An explicitly requested configuration file does not exist.
    #[error("configuration file not found: {0}")]
    MissingConfig(Utf8PathBuf),

    /// The configured Go package name is not a valid identifier.
    #[error("invalid Go package name '{0}'")]
    InvalidPackageName(String),

    /// One or more artifacts failed verification.
    #[error("{failed} of {total} generated file(s) failed verification")]
    CheckFailed {
        /// Number of artifacts that failed.
        failed: usize,
        /// Number of artifacts checked.
        total: usize,
    },

    /// JSON output could not be produced.
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem access failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl From<figment::Error> for FlaggenError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
