//! Check routines invoked by test harnesses and the `flaggen` binary.
//!
//! Each routine generates one artifact from a registry snapshot and hands it
//! to [`reconcile`](crate::reconcile::reconcile). A failed check has already
//! rewritten the checked-in file by the time it returns.

use crate::accessor::{self, AccessorTemplate, DEFAULT_TEMPLATE};
use crate::artifact::{ArtifactKind, GeneratedArtifact};
use crate::config::FlaggenConfig;
use crate::error::FlaggenError;
use crate::reconcile::reconcile;
use crate::registry::Registry;
use crate::typescript::{self, Banner};

/// Generates the TypeScript interface artifact.
#[must_use]
pub fn interface_artifact(registry: &Registry, config: &FlaggenConfig) -> GeneratedArtifact {
    let banner = Banner {
        registry: config.registry.as_str(),
        verify: &config.verify_hint,
    };
    GeneratedArtifact::new(
        ArtifactKind::Interface,
        config.interface_path(),
        typescript::generate(registry, &banner),
    )
}

/// Compiles the configured accessor template.
///
/// # Errors
///
/// Returns [`FlaggenError::Template`] when the configured template is
/// malformed.
pub fn accessor_template(config: &FlaggenConfig) -> Result<AccessorTemplate, FlaggenError> {
    let source = config.accessor_template.as_deref().unwrap_or(DEFAULT_TEMPLATE);
    Ok(AccessorTemplate::parse(source)?)
}

/// Generates the Go accessor artifact.
///
/// # Errors
///
/// Returns [`FlaggenError::InvalidPackageName`], [`FlaggenError::Template`]
/// or [`FlaggenError::Render`]. Nothing is written in any of these cases.
pub fn accessor_artifact(
    registry: &Registry,
    config: &FlaggenConfig,
) -> Result<GeneratedArtifact, FlaggenError> {
    if !accessor::is_valid_package_name(&config.go_package) {
        return Err(FlaggenError::InvalidPackageName(config.go_package.clone()));
    }
    let template = accessor_template(config)?;
    let content = accessor::generate(&template, registry.records(), &config.go_package)?;
    Ok(GeneratedArtifact::new(
        ArtifactKind::Accessors,
        config.accessor_path(),
        content,
    ))
}

/// Generates the artifact of the given kind.
///
/// # Errors
///
/// As [`accessor_artifact`]; interface generation cannot fail.
pub fn artifact(
    kind: ArtifactKind,
    registry: &Registry,
    config: &FlaggenConfig,
) -> Result<GeneratedArtifact, FlaggenError> {
    match kind {
        ArtifactKind::Interface => Ok(interface_artifact(registry, config)),
        ArtifactKind::Accessors => accessor_artifact(registry, config),
    }
}

/// Verifies the TypeScript interface declaration, regenerating it on drift.
///
/// # Errors
///
/// Returns [`FlaggenError::Drift`] when the checked-in file was stale.
pub fn check_interface(registry: &Registry, config: &FlaggenConfig) -> Result<(), FlaggenError> {
    check(ArtifactKind::Interface, registry, config)
}

/// Verifies the Go accessor file, regenerating it on drift.
///
/// # Errors
///
/// Returns generation errors from [`accessor_artifact`] before any file is
/// touched, or [`FlaggenError::Drift`] when the checked-in file was stale.
pub fn check_accessors(registry: &Registry, config: &FlaggenConfig) -> Result<(), FlaggenError> {
    check(ArtifactKind::Accessors, registry, config)
}

/// Verifies one artifact kind.
///
/// # Errors
///
/// As [`check_interface`] and [`check_accessors`].
pub fn check(
    kind: ArtifactKind,
    registry: &Registry,
    config: &FlaggenConfig,
) -> Result<(), FlaggenError> {
    let candidate = artifact(kind, registry, config)?;
    tracing::debug!(%kind, path = %candidate.target_path, "checking generated file");
    reconcile(&candidate)?;
    Ok(())
}

/// Outcome of checking several artifacts.
#[derive(Debug, Default)]
pub struct CheckReport {
    outcomes: Vec<(ArtifactKind, Result<(), FlaggenError>)>,
}

impl CheckReport {
    /// Per-artifact outcomes in check order.
    #[must_use]
    pub fn outcomes(&self) -> &[(ArtifactKind, Result<(), FlaggenError>)] {
        &self.outcomes
    }

    /// Iterates over the failed artifacts and their errors.
    pub fn failures(&self) -> impl Iterator<Item = (ArtifactKind, &FlaggenError)> {
        self.outcomes
            .iter()
            .filter_map(|(kind, outcome)| outcome.as_ref().err().map(|err| (*kind, err)))
    }

    /// Whether every artifact passed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|(_, outcome)| outcome.is_ok())
    }

    /// Collapses the report into a single result.
    ///
    /// # Errors
    ///
    /// Returns [`FlaggenError::CheckFailed`] when any artifact failed.
    pub fn into_result(self) -> Result<(), FlaggenError> {
        let failed = self.failures().count();
        if failed == 0 {
            Ok(())
        } else {
            Err(FlaggenError::CheckFailed {
                failed,
                total: self.outcomes.len(),
            })
        }
    }
}

/// Checks each kind in `kinds`, continuing past failures.
#[must_use]
pub fn check_kinds(kinds: &[ArtifactKind], registry: &Registry, config: &FlaggenConfig) -> CheckReport {
    let outcomes = kinds
        .iter()
        .map(|&kind| (kind, check(kind, registry, config)))
        .collect();
    CheckReport { outcomes }
}

/// Checks both artifacts, continuing past failures.
#[must_use]
pub fn check_all(registry: &Registry, config: &FlaggenConfig) -> CheckReport {
    check_kinds(&ArtifactKind::ALL, registry, config)
}
