//! Feature flag registry model.
//!
//! The registry is an ordered list of [`FlagRecord`] values. Generators only
//! ever see a validated [`Registry`], so every precondition on flag names is
//! checked once here rather than at each use-site. Order is preserved exactly
//! as written because it determines the order of generated members.

use std::collections::HashMap;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::FlaggenError;
use crate::fs_helpers;

/// A single named feature flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagRecord {
    /// Canonical flag name, also the runtime lookup key.
    pub name: String,
    /// Free-text description; empty when the flag is undocumented.
    #[serde(default)]
    pub description: String,
}

impl FlagRecord {
    /// Creates a record from a name and description.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Precondition violations detected while validating registry records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A record has an empty name.
    #[error("flag at position {index} has an empty name")]
    EmptyName {
        /// Zero-based position of the record.
        index: usize,
    },

    /// A name contains a character outside ASCII letters, digits, `-` and `.`.
    #[error("flag '{name}' contains unsupported character {character:?}")]
    InvalidCharacter {
        /// Offending flag name.
        name: String,
        /// First unsupported character.
        character: char,
    },

    /// A name has no letter or digit, so no method name can be derived.
    #[error("flag '{name}' must contain at least one letter or digit")]
    NoAlphanumeric {
        /// Offending flag name.
        name: String,
    },

    /// Two records share a name.
    #[error("flag '{name}' is declared twice (positions {first} and {second})")]
    DuplicateName {
        /// Duplicated flag name.
        name: String,
        /// Position of the first declaration.
        first: usize,
        /// Position of the repeated declaration.
        second: usize,
    },
}

/// An ordered, validated collection of feature flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    records: Vec<FlagRecord>,
}

#[derive(Debug, Deserialize)]
struct RegistryDocument {
    #[serde(default)]
    flags: Vec<FlagRecord>,
}

impl Registry {
    /// Validates `records` and wraps them in a registry, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistryError`] found, scanning in order.
    pub fn new(records: Vec<FlagRecord>) -> Result<Self, RegistryError> {
        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            validate_name(index, &record.name)?;
            if let Some(&first) = seen.get(record.name.as_str()) {
                return Err(RegistryError::DuplicateName {
                    name: record.name.clone(),
                    first,
                    second: index,
                });
            }
            seen.insert(&record.name, index);
        }
        Ok(Self { records })
    }

    /// Parses a TOML registry document held in memory.
    ///
    /// The document is a list of `[[flags]]` tables with `name` and optional
    /// `description` keys. Other keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FlaggenError::RegistryParse`] for malformed TOML and
    /// [`FlaggenError::Registry`] for invalid records.
    pub fn from_toml_str(source: &str) -> Result<Self, FlaggenError> {
        Self::parse(source, Utf8Path::new("<memory>"))
    }

    /// Reads and validates the TOML registry at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FlaggenError::Io`] when the file cannot be read, otherwise as
    /// [`Registry::from_toml_str`].
    pub fn load(path: &Utf8Path) -> Result<Self, FlaggenError> {
        let source = fs_helpers::read_text(path).map_err(|source| FlaggenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::parse(&source, path)?;
        tracing::debug!(%path, flags = registry.len(), "loaded flag registry");
        Ok(registry)
    }

    fn parse(source: &str, origin: &Utf8Path) -> Result<Self, FlaggenError> {
        let document: RegistryDocument =
            toml::from_str(source).map_err(|err| FlaggenError::RegistryParse {
                path: origin.to_path_buf(),
                source: Box::new(err),
            })?;
        Ok(Self::new(document.flags)?)
    }

    /// Returns the records in registry order.
    #[must_use]
    pub fn records(&self) -> &[FlagRecord] {
        &self.records
    }

    /// Iterates over the records in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, FlagRecord> {
        self.records.iter()
    }

    /// Number of registered flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry has no flags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a FlagRecord;
    type IntoIter = std::slice::Iter<'a, FlagRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn validate_name(index: usize, name: &str) -> Result<(), RegistryError> {
    if name.is_empty() {
        return Err(RegistryError::EmptyName { index });
    }
    if let Some(character) = name
        .chars()
        .find(|ch| !(ch.is_ascii_alphanumeric() || matches!(*ch, '-' | '.')))
    {
        return Err(RegistryError::InvalidCharacter {
            name: name.to_owned(),
            character,
        });
    }
    if !name.chars().any(|ch| ch.is_ascii_alphanumeric()) {
        return Err(RegistryError::NoAlphanumeric {
            name: name.to_owned(),
        });
    }
    Ok(())
}
