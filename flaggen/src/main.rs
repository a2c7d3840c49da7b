//! CLI entrypoint for `flaggen`.

mod cli;

use std::io::{self, Write};

use camino::Utf8PathBuf;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use flaggen::artifact::ArtifactKind;
use flaggen::check;
use flaggen::config::FlaggenConfig;
use flaggen::error::FlaggenError;
use flaggen::ident::{to_method_fragment, to_property_key};
use flaggen::reconcile::reconcile;
use flaggen::registry::Registry;

use crate::cli::{Args, Command};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_tracing(&args);
    run(args).map_err(color_eyre::eyre::Report::from)
}

fn init_tracing(args: &Args) {
    let directive = match (args.is_quiet, args.verbose) {
        (true, _) => "flaggen=error",
        (false, 0) => "flaggen=info",
        (false, 1) => "flaggen=debug",
        (false, _) => "flaggen=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<(), FlaggenError> {
    let config = FlaggenConfig::load(args.config.as_deref(), &args.paths.to_overrides())?;
    let registry = Registry::load(&config.registry_path())?;

    match args.command {
        Command::Check(check_args) => {
            let report = check::check_kinds(&check_args.kinds(), &registry, &config);
            for (kind, err) in report.failures() {
                tracing::error!(%kind, "{err}");
            }
            report.into_result()
        }
        Command::Generate => generate(&registry, &config),
        Command::List(list_args) => list(&registry, list_args.should_emit_json),
    }
}

fn generate(registry: &Registry, config: &FlaggenConfig) -> Result<(), FlaggenError> {
    for kind in ArtifactKind::ALL {
        let artifact = check::artifact(kind, registry, config)?;
        match reconcile(&artifact) {
            Ok(()) => tracing::info!(%kind, path = %artifact.target_path, "already up to date"),
            Err(drift) if drift.was_rewritten() => {
                tracing::info!(%kind, path = %artifact.target_path, "updated");
            }
            Err(drift) => return Err(drift.into()),
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct FlagSummary<'a> {
    name: &'a str,
    description: &'a str,
    property_key: String,
    accessor: String,
}

fn list(registry: &Registry, should_emit_json: bool) -> Result<(), FlaggenError> {
    let summaries: Vec<FlagSummary<'_>> = registry
        .iter()
        .map(|record| FlagSummary {
            name: &record.name,
            description: &record.description,
            property_key: to_property_key(&record.name),
            accessor: format!("Is{}Enabled", to_method_fragment(&record.name)),
        })
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = if should_emit_json {
        serde_json::to_writer_pretty(&mut out, &summaries)?;
        writeln!(out)
    } else {
        summaries.iter().try_for_each(|summary| {
            writeln!(
                out,
                "{}\t{}\t{}",
                summary.name, summary.property_key, summary.accessor
            )
        })
    };
    written.map_err(|source| FlaggenError::Io {
        path: Utf8PathBuf::from("<stdout>"),
        source,
    })
}
