//! Integration tests for the verify-and-reconcile cycle against real files.

use std::error::Error;

use flaggen::artifact::ArtifactKind;
use flaggen::check::{self, check_accessors, check_all, check_interface};
use flaggen::config::FlaggenConfig;
use flaggen::error::FlaggenError;
use flaggen::reconcile::{DriftError, DriftReason};
use flaggen::registry::Registry;
use rstest::{fixture, rstest};
use test_helpers::TempWorkspace;
use test_helpers::fixtures::{SAMPLE_FLAGS, SAMPLE_REGISTRY, registry_toml};

type TestResult = Result<(), Box<dyn Error>>;

const INTERFACE: &str = "generated/featureToggles.gen.ts";
const ACCESSORS: &str = "generated/toggles_gen.go";

struct Setup {
    workspace: TempWorkspace,
    config: FlaggenConfig,
    registry: Registry,
}

#[fixture]
fn setup() -> Setup {
    let workspace = TempWorkspace::new().expect("temporary workspace");
    workspace
        .write("flags.toml", SAMPLE_REGISTRY)
        .expect("write registry");
    let config = FlaggenConfig {
        root: workspace.root().to_path_buf(),
        ..FlaggenConfig::default()
    };
    let registry = Registry::load(&config.registry_path()).expect("load registry");
    Setup {
        workspace,
        config,
        registry,
    }
}

fn expect_drift(result: Result<(), FlaggenError>) -> DriftError {
    match result {
        Err(FlaggenError::Drift(drift)) => drift,
        other => panic!("expected drift, got {other:?}"),
    }
}

#[rstest]
fn missing_interface_is_written_then_passes(setup: Setup) -> TestResult {
    let drift = expect_drift(check_interface(&setup.registry, &setup.config));
    assert_eq!(drift.kind, ArtifactKind::Interface);
    assert!(matches!(drift.reason, DriftReason::Missing), "{drift}");
    assert!(drift.was_rewritten());
    assert!(setup.workspace.exists(INTERFACE));

    check_interface(&setup.registry, &setup.config)?;
    Ok(())
}

#[rstest]
fn stale_accessors_are_overwritten(setup: Setup) -> TestResult {
    setup.workspace.write(ACCESSORS, "package stale\n")?;

    let drift = expect_drift(check_accessors(&setup.registry, &setup.config));
    match &drift.reason {
        DriftReason::Mismatch(diff) => {
            assert_eq!(diff.line, 1);
            assert_eq!(diff.found.as_deref(), Some("package stale"));
        }
        other => panic!("expected mismatch, got {other}"),
    }
    let message = drift.to_string();
    assert!(message.contains("review and commit"), "{message}");
    assert!(message.contains("\n-package stale\n+// NOTE: This file is autogenerated"), "{message}");

    let healed = setup.workspace.read(ACCESSORS)?.ok_or("accessors missing")?;
    assert!(healed.starts_with("// NOTE: This file is autogenerated\n"));
    check_accessors(&setup.registry, &setup.config)?;
    Ok(())
}

#[rstest]
fn up_to_date_file_is_left_alone(setup: Setup) -> TestResult {
    let artifact = check::interface_artifact(&setup.registry, &setup.config);
    setup.workspace.write(INTERFACE, &artifact.content)?;
    let before = std::fs::metadata(setup.workspace.path(INTERFACE))?.modified()?;

    check_interface(&setup.registry, &setup.config)?;

    let after = std::fs::metadata(setup.workspace.path(INTERFACE))?.modified()?;
    assert_eq!(before, after);
    Ok(())
}

#[rstest]
fn non_utf8_file_is_rewritten_then_passes(setup: Setup) -> TestResult {
    setup.workspace.write_bytes(INTERFACE, &[0xff, 0xfe])?;

    let drift = expect_drift(check_interface(&setup.registry, &setup.config));
    assert!(matches!(drift.reason, DriftReason::Unreadable(_)), "{drift}");
    assert!(drift.was_rewritten());
    assert!(drift.to_string().contains("it has been regenerated"), "{drift}");

    let healed = setup.workspace.read(INTERFACE)?.ok_or("interface missing")?;
    assert_eq!(
        healed,
        check::interface_artifact(&setup.registry, &setup.config).content
    );
    check_interface(&setup.registry, &setup.config)?;
    Ok(())
}

#[rstest]
fn failed_rewrite_is_reported(setup: Setup) -> TestResult {
    setup.workspace.write("generated", "not a directory")?;

    let drift = expect_drift(check_accessors(&setup.registry, &setup.config));
    assert!(matches!(drift.reason, DriftReason::Unreadable(_)), "{drift}");
    assert!(!drift.was_rewritten());
    assert!(drift.to_string().contains("also failed"), "{drift}");
    Ok(())
}

#[rstest]
fn malformed_template_writes_nothing(setup: Setup) {
    let config = FlaggenConfig {
        accessor_template: Some("Is{bogus}Enabled".to_owned()),
        ..setup.config.clone()
    };
    let err = check_accessors(&setup.registry, &config).expect_err("bad template");
    assert!(matches!(err, FlaggenError::Template(_)), "{err}");
    assert!(!setup.workspace.exists(ACCESSORS));
}

#[rstest]
fn invalid_package_name_writes_nothing(setup: Setup) {
    let config = FlaggenConfig {
        go_package: "9lives".to_owned(),
        ..setup.config.clone()
    };
    let err = check_accessors(&setup.registry, &config).expect_err("bad package");
    assert!(matches!(err, FlaggenError::InvalidPackageName(_)), "{err}");
    assert!(!setup.workspace.exists(ACCESSORS));
}

#[rstest]
fn check_all_reports_every_failure_then_heals(setup: Setup) -> TestResult {
    let report = check_all(&setup.registry, &setup.config);
    assert!(!report.is_success());
    assert_eq!(report.failures().count(), 2);
    assert!(matches!(
        report.into_result(),
        Err(FlaggenError::CheckFailed {
            failed: 2,
            total: 2
        })
    ));

    let report = check_all(&setup.registry, &setup.config);
    assert!(report.is_success());
    report.into_result()?;
    Ok(())
}

#[rstest]
fn registry_edit_is_picked_up(setup: Setup) -> TestResult {
    assert!(check_all(&setup.registry, &setup.config).into_result().is_err());

    let mut flags = SAMPLE_FLAGS.to_vec();
    flags.push(("new.flag", "added later"));
    setup.workspace.write("flags.toml", &registry_toml(&flags))?;
    let registry = Registry::load(&setup.config.registry_path())?;

    let drift = expect_drift(check_interface(&registry, &setup.config));
    match &drift.reason {
        DriftReason::Mismatch(diff) => {
            assert_eq!(diff.expected.as_deref(), Some("  ['new.flag']?: boolean;"));
            assert_eq!(diff.found.as_deref(), Some("}"));
        }
        other => panic!("expected mismatch, got {other}"),
    }
    let accessors = check::accessor_artifact(&registry, &setup.config)?;
    assert!(accessors.content.contains("func (ft *FeatureToggles) IsNewFlagEnabled() bool {"));
    Ok(())
}

#[rstest]
fn one_binding_per_flag(setup: Setup) -> TestResult {
    let interface = check::interface_artifact(&setup.registry, &setup.config).content;
    let accessors = check::accessor_artifact(&setup.registry, &setup.config)?.content;

    let properties = interface
        .lines()
        .filter(|line| line.starts_with("  ") && line.ends_with("?: boolean;"))
        .count();
    let methods = accessors
        .lines()
        .filter(|line| line.starts_with("func (ft *FeatureToggles) Is"))
        .count();
    let lookups = accessors.matches("ft.manager.IsEnabled(\"").count();

    assert_eq!(properties, setup.registry.len());
    assert_eq!(methods, setup.registry.len());
    assert_eq!(lookups, setup.registry.len());
    for record in &setup.registry {
        assert!(accessors.contains(&format!("ft.manager.IsEnabled(\"{}\")", record.name)));
    }
    Ok(())
}

#[rstest]
fn generation_is_deterministic(setup: Setup) -> TestResult {
    let first = check::accessor_artifact(&setup.registry, &setup.config)?;
    let second = check::accessor_artifact(&setup.registry, &setup.config)?;
    assert_eq!(first, second);
    assert_eq!(
        check::interface_artifact(&setup.registry, &setup.config),
        check::interface_artifact(&setup.registry, &setup.config)
    );
    Ok(())
}
