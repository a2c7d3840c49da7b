//! Layered configuration for `flaggen`.
//!
//! Values are merged with `figment` in increasing precedence:
//!
//! 1. built-in defaults,
//! 2. `flaggen.toml` (or the file passed with `--config`),
//! 3. `FLAGGEN_*` environment variables,
//! 4. command-line overrides.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::error::FlaggenError;

/// Default configuration file name, looked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "flaggen.toml";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "FLAGGEN_";

/// Resolved `flaggen` settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlaggenConfig {
    /// Directory that relative paths are resolved against.
    pub root: Utf8PathBuf,
    /// Registry file, also quoted in the TypeScript banner.
    pub registry: Utf8PathBuf,
    /// Checked-in TypeScript interface declaration.
    pub interface_out: Utf8PathBuf,
    /// Checked-in Go accessor file.
    pub accessor_out: Utf8PathBuf,
    /// Go package clause for the accessor file.
    pub go_package: String,
    /// Verification hint quoted in the TypeScript banner.
    pub verify_hint: String,
    /// Replacement for the built-in accessor template.
    pub accessor_template: Option<String>,
}

impl Default for FlaggenConfig {
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from("."),
            registry: Utf8PathBuf::from("flags.toml"),
            interface_out: Utf8PathBuf::from("generated/featureToggles.gen.ts"),
            accessor_out: Utf8PathBuf::from("generated/toggles_gen.go"),
            go_package: "featuremgmt".to_owned(),
            verify_hint: "flaggen check".to_owned(),
            accessor_template: None,
        }
    }
}

/// Command-line values that take precedence over every other layer.
///
/// Unset fields leave lower layers untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigOverrides {
    /// Override for [`FlaggenConfig::root`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<Utf8PathBuf>,
    /// Override for [`FlaggenConfig::registry`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<Utf8PathBuf>,
    /// Override for [`FlaggenConfig::interface_out`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface_out: Option<Utf8PathBuf>,
    /// Override for [`FlaggenConfig::accessor_out`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessor_out: Option<Utf8PathBuf>,
    /// Override for [`FlaggenConfig::go_package`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub go_package: Option<String>,
}

impl FlaggenConfig {
    /// Builds the layered figment without extracting it.
    ///
    /// When `config_file` is `None`, [`CONFIG_FILE_NAME`] is used if present.
    #[must_use]
    pub fn figment(config_file: Option<&Utf8Path>, overrides: &ConfigOverrides) -> Figment {
        let file = config_file.unwrap_or_else(|| Utf8Path::new(CONFIG_FILE_NAME));
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file.as_std_path()))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
    }

    /// Loads configuration from every layer.
    ///
    /// # Errors
    ///
    /// Returns [`FlaggenError::MissingConfig`] when an explicit `config_file`
    /// does not exist and [`FlaggenError::Config`] when a layer holds values
    /// of the wrong shape.
    pub fn load(
        config_file: Option<&Utf8Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, FlaggenError> {
        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(FlaggenError::MissingConfig(path.to_path_buf()));
            }
        }
        let config: Self = Self::figment(config_file, overrides).extract()?;
        tracing::debug!(?config, "resolved configuration");
        Ok(config)
    }

    /// Registry path resolved against [`FlaggenConfig::root`].
    #[must_use]
    pub fn registry_path(&self) -> Utf8PathBuf {
        self.root.join(&self.registry)
    }

    /// Interface declaration path resolved against [`FlaggenConfig::root`].
    #[must_use]
    pub fn interface_path(&self) -> Utf8PathBuf {
        self.root.join(&self.interface_out)
    }

    /// Accessor file path resolved against [`FlaggenConfig::root`].
    #[must_use]
    pub fn accessor_path(&self) -> Utf8PathBuf {
        self.root.join(&self.accessor_out)
    }
}
