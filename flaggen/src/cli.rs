//! Command-line interface definitions for `flaggen`.

use camino::Utf8PathBuf;
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand, ValueEnum};
use flaggen::artifact::ArtifactKind;
use flaggen::config::ConfigOverrides;

/// Parsed CLI arguments for `flaggen`.
#[derive(Debug, Parser)]
#[command(name = "flaggen")]
#[command(about = "Generate and verify feature flag bindings from a flag registry")]
#[command(version)]
pub struct Args {
    /// Configuration file (defaults to `flaggen.toml` when present).
    #[arg(long, value_name = "path", global = true)]
    pub config: Option<Utf8PathBuf>,
    /// Path overrides applied on top of the configuration file.
    #[command(flatten)]
    pub paths: PathArgs,
    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Only log errors.
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub is_quiet: bool,
    /// Operation to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Overrides for configured locations.
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct PathArgs {
    /// Directory that relative paths are resolved against.
    #[arg(long, value_name = "dir", global = true)]
    pub root: Option<Utf8PathBuf>,
    /// Flag registry file.
    #[arg(long, value_name = "path", global = true)]
    pub registry: Option<Utf8PathBuf>,
    /// Generated TypeScript interface declaration.
    #[arg(long, value_name = "path", global = true)]
    pub interface_out: Option<Utf8PathBuf>,
    /// Generated Go accessor file.
    #[arg(long, value_name = "path", global = true)]
    pub accessor_out: Option<Utf8PathBuf>,
    /// Go package clause for the accessor file.
    #[arg(long, value_name = "name", global = true)]
    pub go_package: Option<String>,
}

impl PathArgs {
    /// Converts the flags into configuration overrides.
    pub fn to_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            root: self.root.clone(),
            registry: self.registry.clone(),
            interface_out: self.interface_out.clone(),
            accessor_out: self.accessor_out.clone(),
            go_package: self.go_package.clone(),
        }
    }
}

/// `flaggen` subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify generated files, rewriting any that are stale; exits non-zero on drift.
    Check(CheckArgs),
    /// Write both generated files; drift is logged but not treated as failure.
    Generate,
    /// Print registered flags with their generated identifiers.
    List(ListArgs),
}

/// Arguments for `flaggen check`.
#[derive(Debug, Clone, Copy, ClapArgs)]
pub struct CheckArgs {
    /// Check a single generated file instead of both.
    #[arg(long, value_enum)]
    pub only: Option<Target>,
}

impl CheckArgs {
    /// Artifact kinds selected for checking.
    pub fn kinds(self) -> Vec<ArtifactKind> {
        self.only
            .map_or_else(|| ArtifactKind::ALL.to_vec(), |target| vec![target.kind()])
    }
}

/// Arguments for `flaggen list`.
#[derive(Debug, Clone, Copy, ClapArgs)]
pub struct ListArgs {
    /// Emit JSON instead of a tab-separated table.
    #[arg(long = "json")]
    pub should_emit_json: bool,
}

/// Generated file selector.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Target {
    /// The TypeScript interface declaration.
    Interface,
    /// The Go accessor file.
    Accessors,
}

impl Target {
    /// Maps the selector onto its artifact kind.
    pub const fn kind(self) -> ArtifactKind {
        match self {
            Self::Interface => ArtifactKind::Interface,
            Self::Accessors => ArtifactKind::Accessors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[rstest]
    fn global_overrides_follow_the_subcommand() {
        let args = Args::try_parse_from([
            "flaggen",
            "check",
            "--only",
            "accessors",
            "--go-package",
            "toggles",
            "--root",
            "repo",
        ])
        .expect("parse");
        let overrides = args.paths.to_overrides();
        assert_eq!(overrides.go_package.as_deref(), Some("toggles"));
        assert_eq!(overrides.root.as_deref().map(|p| p.as_str()), Some("repo"));
        assert!(overrides.registry.is_none());
        match args.command {
            Command::Check(check) => assert_eq!(check.kinds(), [ArtifactKind::Accessors]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[rstest]
    fn check_defaults_to_every_artifact() {
        let args = Args::try_parse_from(["flaggen", "check"]).expect("parse");
        match args.command {
            Command::Check(check) => assert_eq!(check.kinds(), ArtifactKind::ALL),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[rstest]
    fn quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["flaggen", "-q", "-v", "list"]).is_err());
    }
}
