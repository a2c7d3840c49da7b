//! Go accessor generator.
//!
//! Produces one `Is<Fragment>Enabled` predicate per flag. Each method
//! delegates to `manager.IsEnabled` with the literal registry name, which is
//! the runtime lookup key. The per-record body comes from an
//! [`AccessorTemplate`] compiled before generation starts.

mod template;

pub use template::{AccessorTemplate, DEFAULT_TEMPLATE, RenderErrorKind, TemplateError};

use thiserror::Error;

use crate::registry::FlagRecord;

/// A record failed to render; generation stopped at that record.
///
/// The output produced for the preceding records is kept so callers can
/// inspect how far generation got.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to render accessor for flag '{name}' (position {index}): {kind}")]
pub struct RenderError {
    /// Name of the record that failed.
    pub name: String,
    /// Zero-based position of the record.
    pub index: usize,
    /// Why rendering failed.
    pub kind: RenderErrorKind,
    partial: String,
}

impl RenderError {
    /// Output rendered before the failing record, header included.
    #[must_use]
    pub fn partial(&self) -> &str {
        &self.partial
    }

    /// Consumes the error, returning the partial output.
    #[must_use]
    pub fn into_partial(self) -> String {
        self.partial
    }
}

/// Renders the accessor file for `records` in package `package`.
///
/// # Errors
///
/// Returns a [`RenderError`] carrying the partial output when a record cannot
/// be rendered. Records after the failing one are not attempted.
///
/// # Examples
///
/// ```
/// use flaggen::accessor::{AccessorTemplate, DEFAULT_TEMPLATE, generate};
/// use flaggen::registry::FlagRecord;
///
/// let template = AccessorTemplate::parse(DEFAULT_TEMPLATE)?;
/// let out = generate(&template, &[FlagRecord::new("feature-x", "enables X")], "featuremgmt")?;
/// assert!(out.contains("func (ft *FeatureToggles) IsFeatureXEnabled() bool {"));
/// assert!(out.contains("ft.manager.IsEnabled(\"feature-x\")"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn generate(
    template: &AccessorTemplate,
    records: &[FlagRecord],
    package: &str,
) -> Result<String, RenderError> {
    let mut content = String::with_capacity(64 + records.len() * 192);
    content.push_str("// NOTE: This file is autogenerated\n\npackage ");
    content.push_str(package);
    content.push('\n');

    for (index, record) in records.iter().enumerate() {
        if let Err(kind) = template.render_into(record, &mut content) {
            tracing::debug!(flag = %record.name, index, "accessor rendering stopped");
            return Err(RenderError {
                name: record.name.clone(),
                index,
                kind,
                partial: content,
            });
        }
    }

    tracing::debug!(methods = records.len(), "rendered accessors");
    Ok(content)
}

/// Whether `name` is usable as a Go package clause.
#[must_use]
pub fn is_valid_package_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_alphanumeric() || ch == '_')
}
