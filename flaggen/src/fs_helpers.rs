//! Filesystem helpers shared across `flaggen` modules.
//!
//! All access goes through `cap_std` directory handles opened on the parent
//! of the target path.

use std::io::{self, Write};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

/// Reads `path` as UTF-8 text.
///
/// # Errors
///
/// Returns the underlying I/O error, including `NotFound` when the file or
/// its parent directory does not exist.
pub fn read_text(path: &Utf8Path) -> io::Result<String> {
    let (parent, file_name) = split_path(path)?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read_to_string(file_name)
}

/// Writes `content` to `path`, creating parent directories and truncating
/// any existing file.
///
/// # Errors
///
/// Returns the underlying I/O error.
pub fn write_text(path: &Utf8Path, content: &str) -> io::Result<()> {
    let (parent, file_name) = split_path(path)?;
    let dir = ensure_dir(parent)?;
    let mut file = dir.open_with(
        file_name,
        OpenOptions::new().write(true).create(true).truncate(true),
    )?;
    file.write_all(content.as_bytes())?;
    file.flush()
}

fn split_path(path: &Utf8Path) -> io::Result<(&Utf8Path, &str)> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{path} does not name a file"),
        )
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    Ok((parent, file_name))
}

fn ensure_dir(path: &Utf8Path) -> io::Result<Dir> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority())?;
            Dir::open_ambient_dir(path, ambient_authority())
        }
        Err(open_err) => Err(open_err),
    }
}
