//! Disposable on-disk workspace for integration tests.
//!
//! Files are addressed relative to the workspace root and accessed through a
//! `cap_std` directory handle, so tests cannot escape the temporary tree.

use std::io::ErrorKind;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tempfile::TempDir;

/// A temporary directory removed on drop.
pub struct TempWorkspace {
    _guard: TempDir,
    root: Utf8PathBuf,
    dir: Dir,
}

impl TempWorkspace {
    /// Creates an empty workspace.
    ///
    /// # Errors
    ///
    /// Returns an error when the temporary directory cannot be created or its
    /// path is not UTF-8.
    pub fn new() -> Result<Self> {
        let guard = tempfile::tempdir().context("create temporary workspace")?;
        let root = Utf8PathBuf::from_path_buf(guard.path().to_path_buf())
            .map_err(|path| anyhow::anyhow!("non-UTF-8 temp path: {}", path.display()))?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())
            .with_context(|| format!("open workspace {root}"))?;
        Ok(Self {
            _guard: guard,
            root,
            dir,
        })
    }

    /// Absolute path of the workspace root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Absolute path of `relative` inside the workspace.
    #[must_use]
    pub fn path(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }

    /// Writes `content` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error when a directory or the file cannot be written.
    pub fn write(&self, relative: &str, content: &str) -> Result<()> {
        self.write_bytes(relative, content.as_bytes())
    }

    /// Writes raw bytes, which need not be UTF-8, to `relative`.
    ///
    /// # Errors
    ///
    /// Returns an error when a directory or the file cannot be written.
    pub fn write_bytes(&self, relative: &str, content: &[u8]) -> Result<()> {
        if let Some(parent) = Utf8Path::new(relative).parent() {
            if !parent.as_str().is_empty() {
                self.dir
                    .create_dir_all(parent)
                    .with_context(|| format!("create {parent}"))?;
            }
        }
        self.dir
            .write(relative, content)
            .with_context(|| format!("write {relative}"))
    }

    /// Reads `relative`, returning `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than a missing file.
    pub fn read(&self, relative: &str) -> Result<Option<String>> {
        match self.dir.read_to_string(relative) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("read {relative}")),
        }
    }

    /// Whether `relative` exists.
    #[must_use]
    pub fn exists(&self, relative: &str) -> bool {
        self.dir.exists(relative)
    }
}
