//! Generated artifact descriptors.

use std::fmt;

use camino::Utf8PathBuf;

/// The two files derived from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// TypeScript interface declaration.
    Interface,
    /// Go accessor methods.
    Accessors,
}

impl ArtifactKind {
    /// Every artifact kind, in check order.
    pub const ALL: [Self; 2] = [Self::Interface, Self::Accessors];

    /// Short name used in logs and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Interface => "interface",
            Self::Accessors => "accessors",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Freshly generated file content paired with where it belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Which artifact this is.
    pub kind: ArtifactKind,
    /// Path of the checked-in copy.
    pub target_path: Utf8PathBuf,
    /// Candidate file content.
    pub content: String,
}

impl GeneratedArtifact {
    /// Bundles generated `content` with its target path.
    #[must_use]
    pub fn new(kind: ArtifactKind, target_path: impl Into<Utf8PathBuf>, content: String) -> Self {
        Self {
            kind,
            target_path: target_path.into(),
            content,
        }
    }
}
