//! Verify-and-reconcile driver for generated files.
//!
//! The checked-in copy of each artifact is compared byte for byte with a
//! freshly generated candidate. On any difference the candidate overwrites the
//! checked-in file and the drift is still reported, so the working tree always
//! ends up in sync while the caller sees a failure to review.

use std::fmt;
use std::io;

use camino::Utf8PathBuf;

use crate::artifact::{ArtifactKind, GeneratedArtifact};
use crate::fs_helpers;

/// First line at which candidate and checked-in content diverge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDifference {
    /// One-based line number.
    pub line: usize,
    /// Line in the generated candidate, `None` past its end.
    pub expected: Option<String>,
    /// Line in the checked-in file, `None` past its end.
    pub found: Option<String>,
    /// Unified-style excerpt of the changed region, empty when the texts
    /// differ only in a trailing newline.
    pub excerpt: String,
}

/// Why a checked-in file was considered stale.
#[derive(Debug)]
pub enum DriftReason {
    /// No file exists at the target path.
    Missing,
    /// The file exists but could not be read as UTF-8 text.
    Unreadable(io::Error),
    /// The file content differs from the candidate.
    Mismatch(LineDifference),
}

impl fmt::Display for DriftReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("file does not exist"),
            Self::Unreadable(err) => write!(f, "existing file could not be read: {err}"),
            Self::Mismatch(diff) => write!(
                f,
                "content differs at line {}: expected {}, found {}",
                diff.line,
                display_line(diff.expected.as_deref()),
                display_line(diff.found.as_deref()),
            ),
        }
    }
}

fn display_line(line: Option<&str>) -> String {
    line.map_or_else(|| "<end of file>".to_owned(), |text| format!("{text:?}"))
}

/// A generated artifact did not match its checked-in copy.
///
/// By the time this error is returned the driver has already attempted to
/// overwrite the target. `write_error` is set when that attempt failed too.
#[derive(Debug)]
pub struct DriftError {
    /// Which artifact drifted.
    pub kind: ArtifactKind,
    /// Path of the checked-in copy.
    pub path: Utf8PathBuf,
    /// What was wrong with the checked-in copy.
    pub reason: DriftReason,
    /// Failure while writing the regenerated content, if any.
    pub write_error: Option<io::Error>,
}

impl DriftError {
    /// Whether the regenerated content reached the disk.
    #[must_use]
    pub const fn was_rewritten(&self) -> bool {
        self.write_error.is_none()
    }
}

impl fmt::Display for DriftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "generated {} file {} is out of date ({})",
            self.kind, self.path, self.reason
        )?;
        match &self.write_error {
            None => f.write_str("; it has been regenerated, review and commit the changes")?,
            Some(err) => write!(f, "; writing the regenerated file also failed: {err}")?,
        }
        match &self.reason {
            DriftReason::Mismatch(diff) if !diff.excerpt.is_empty() => {
                write!(f, "\n{}", diff.excerpt)
            }
            _ => Ok(()),
        }
    }
}

impl std::error::Error for DriftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match (&self.write_error, &self.reason) {
            (Some(err), _) | (None, DriftReason::Unreadable(err)) => Some(err),
            _ => None,
        }
    }
}

/// Compares `artifact` with its checked-in copy and heals any drift.
///
/// Returns `Ok(())` without touching the filesystem when the contents are
/// identical. Otherwise the candidate is written to the target path and a
/// [`DriftError`] is returned.
///
/// # Errors
///
/// Returns [`DriftError`] when the checked-in copy is missing, unreadable or
/// different from the candidate.
pub fn reconcile(artifact: &GeneratedArtifact) -> Result<(), DriftError> {
    let path = &artifact.target_path;
    let reason = match fs_helpers::read_text(path) {
        Ok(existing) if existing == artifact.content => {
            tracing::debug!(kind = %artifact.kind, %path, "generated file is up to date");
            return Ok(());
        }
        Ok(existing) => DriftReason::Mismatch(first_difference(&artifact.content, &existing)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => DriftReason::Missing,
        Err(err) => DriftReason::Unreadable(err),
    };
    tracing::warn!(kind = %artifact.kind, %path, %reason, "generated file drifted");

    let write_error = fs_helpers::write_text(path, &artifact.content).err();
    match &write_error {
        None => tracing::info!(kind = %artifact.kind, %path, "regenerated file"),
        Some(err) => tracing::error!(kind = %artifact.kind, %path, error = %err, "failed to regenerate file"),
    }

    Err(DriftError {
        kind: artifact.kind,
        path: path.clone(),
        reason,
        write_error,
    })
}

/// Locates the first differing line between two texts.
///
/// Lines are split on `\n` only, so carriage returns take part in the
/// comparison.
#[must_use]
pub fn first_difference(expected: &str, found: &str) -> LineDifference {
    let mut expected_lines = expected.split('\n');
    let mut found_lines = found.split('\n');
    let mut line = 1;
    loop {
        match (expected_lines.next(), found_lines.next()) {
            (Some(left), Some(right)) if left == right => line += 1,
            (left, right) => {
                return LineDifference {
                    line,
                    expected: left.map(str::to_owned),
                    found: right.map(str::to_owned),
                    excerpt: diff_excerpt(expected, found),
                };
            }
        }
    }
}

const CONTEXT_LINES: usize = 2;
const MAX_CHANGED_LINES: usize = 12;

/// Renders the region between the common leading and trailing lines as a
/// single unified-diff hunk, checked-in side first.
fn diff_excerpt(expected_text: &str, found_text: &str) -> String {
    let expected = split_lines(expected_text);
    let found = split_lines(found_text);

    let prefix = expected
        .iter()
        .zip(&found)
        .take_while(|(left, right)| left == right)
        .count();
    let suffix = expected
        .iter()
        .rev()
        .zip(found.iter().rev())
        .take_while(|(left, right)| left == right)
        .count()
        .min(expected.len() - prefix)
        .min(found.len() - prefix);
    let removed = found.len() - prefix - suffix;
    let added = expected.len() - prefix - suffix;
    if removed == 0 && added == 0 {
        return String::new();
    }

    let before = prefix.min(CONTEXT_LINES);
    let after = suffix.min(CONTEXT_LINES);
    let start = prefix - before + 1;
    let mut out = format!(
        "--- checked in\n+++ generated\n@@ -{start},{} +{start},{} @@",
        before + removed + after,
        before + added + after,
    );
    let context_before = expected.iter().skip(prefix - before).take(before);
    let context_after = expected.iter().skip(expected.len() - suffix).take(after);

    for line in context_before {
        out.push_str("\n ");
        out.push_str(line);
    }
    push_changed(&mut out, '-', found.iter().skip(prefix).take(removed).copied(), removed);
    push_changed(&mut out, '+', expected.iter().skip(prefix).take(added).copied(), added);
    for line in context_after {
        out.push_str("\n ");
        out.push_str(line);
    }
    out
}

fn split_lines(text: &str) -> Vec<&str> {
    text.strip_suffix('\n').unwrap_or(text).split('\n').collect()
}

fn push_changed<'a>(
    out: &mut String,
    marker: char,
    lines: impl Iterator<Item = &'a str>,
    total: usize,
) {
    for line in lines.take(MAX_CHANGED_LINES) {
        out.push('\n');
        out.push(marker);
        out.push_str(line);
    }
    if total > MAX_CHANGED_LINES {
        out.push('\n');
        out.push(marker);
        out.push_str(&format!("... {} more line(s)", total - MAX_CHANGED_LINES));
    }
}
