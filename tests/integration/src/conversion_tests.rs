//! End-to-end conversion scenarios with a recording command runner.
//!
//! The fake `cp` performs a real recursive copy so the resulting tree can be
//! inspected; the fake `composer` only records how it was invoked.

use std::path::PathBuf;

use convert_core::testing::FakeRunner;
use convert_core::{
    AugmentOutcome, ConvertConfig, Converter, Error, ExistingDependencyPolicy, Step,
};
use convert_test_utils::{TestWorkspace, copy_tree};
use pretty_assertions::assert_eq;
use serde_json::json;

fn config_for(ws: &TestWorkspace) -> ConvertConfig {
    ConvertConfig {
        invoker_source: ws.invoker_source(),
        ..Default::default()
    }
}

/// A runner whose `cp` copies `<source>` to `<cwd>/<dest>`.
fn copying_runner() -> FakeRunner {
    FakeRunner::new().on_run("cp", |spec| {
        let source = PathBuf::from(&spec.args[1]);
        copy_tree(&source, &spec.current_dir.join(&spec.args[2]));
    })
}

#[test]
fn bare_function_becomes_application() {
    let ws = TestWorkspace::new();
    ws.write("index.php", "<?php echo 'hello';");
    let runner = copying_runner();
    let converter = Converter::new(config_for(&ws), &runner).unwrap();

    let report = converter.run(&ws.root()).unwrap();

    assert_eq!(report.manifest, AugmentOutcome::Created);
    assert_eq!(report.relocation.target, ws.root().join("app"));
    assert_eq!(report.invoker_dir, ws.root().join("invoker"));
    assert_eq!(
        report.router,
        ws.root().join("app/vendor/google/function-invoker/router.php")
    );

    assert_eq!(ws.top_level(), vec!["app", "invoker"]);
    assert_eq!(ws.read("app/index.php"), "<?php echo 'hello';");
    assert_eq!(
        ws.read_json("app/composer.json"),
        json!({"repositories": [{"type": "path", "url": "../invoker", "options": {"symlink": false}}]})
    );
    ws.assert_file_exists("invoker/router.php");

    let calls = runner.calls();
    assert_eq!(runner.names(), vec!["cp", "composer"]);
    assert_eq!(calls[0].current_dir, ws.root());
    assert_eq!(calls[1].current_dir, ws.root().join("app"));
    assert_eq!(calls[1].args, vec!["-n", "require", "google/function-invoker"]);
}

#[test]
fn existing_manifest_keeps_require() {
    let ws = TestWorkspace::new();
    ws.write("index.php", "<?php");
    ws.write("composer.json", r#"{"require": {"foo/bar": "^1.0"}}"#);
    let runner = copying_runner();
    let converter = Converter::new(config_for(&ws), &runner).unwrap();

    let report = converter.run(&ws.root()).unwrap();

    assert_eq!(report.manifest, AugmentOutcome::KeyAdded);
    assert_eq!(
        ws.read_json("app/composer.json"),
        json!({
            "require": {"foo/bar": "^1.0"},
            "repositories": [{"type": "path", "url": "../invoker", "options": {"symlink": false}}]
        })
    );
}

#[test]
fn nested_user_directories_are_relocated() {
    let ws = TestWorkspace::new();
    ws.write("index.php", "<?php require 'lib/util.php';");
    ws.write("lib/util.php", "<?php function util() {}");
    ws.write(".gcloudignore", "vendor/");
    let runner = copying_runner();
    let converter = Converter::new(config_for(&ws), &runner).unwrap();

    let report = converter.run(&ws.root()).unwrap();

    assert_eq!(
        report.relocation.entries,
        vec![".gcloudignore", "composer.json", "index.php", "lib"]
    );
    assert_eq!(ws.read("app/lib/util.php"), "<?php function util() {}");
    assert_eq!(ws.read("app/.gcloudignore"), "vendor/");
}

#[test]
fn copy_failure_skips_composer_and_keeps_app() {
    let ws = TestWorkspace::new();
    ws.write("index.php", "<?php");
    let runner = FakeRunner::new().fail_on("cp", 1, "cp: cannot stat '/invoker'");
    let converter = Converter::new(config_for(&ws), &runner).unwrap();

    let err = converter.run(&ws.root()).unwrap_err();

    assert_eq!(err.step(), Some(Step::CopyInvoker));
    assert!(err.to_string().contains("cannot stat"));
    assert_eq!(runner.names(), vec!["cp"]);
    assert_eq!(ws.top_level(), vec!["app"]);
    ws.assert_file_not_exists("invoker");
    ws.assert_file_exists("app/index.php");
    ws.assert_file_exists("app/composer.json");
}

#[test]
fn composer_exit_failure_carries_stderr() {
    let ws = TestWorkspace::new();
    ws.write("index.php", "<?php");
    let runner = copying_runner().fail_on("composer", 2, "Problem 1\n  - conflict");
    let converter = Converter::new(config_for(&ws), &runner).unwrap();

    let err = converter.run(&ws.root()).unwrap_err();

    assert_eq!(err.step(), Some(Step::InstallInvoker));
    match err.root() {
        Error::CommandFailed { code, stderr, .. } => {
            assert_eq!(*code, Some(2));
            assert_eq!(stderr, "Problem 1\n  - conflict");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn composer_launch_failure_has_no_diagnostics() {
    let ws = TestWorkspace::new();
    ws.write("index.php", "<?php");
    let runner = copying_runner().missing("composer");
    let converter = Converter::new(config_for(&ws), &runner).unwrap();

    let err = converter.run(&ws.root()).unwrap_err();

    assert_eq!(err.step(), Some(Step::RunComposer));
    assert!(matches!(err.root(), Error::Launch { .. }));
}

#[test]
fn invalid_repositories_touches_nothing() {
    let ws = TestWorkspace::new();
    ws.write("index.php", "<?php");
    ws.write("composer.json", r#"{"repositories": {"packagist.org": false}}"#);
    let runner = copying_runner();
    let converter = Converter::new(config_for(&ws), &runner).unwrap();

    let err = converter.run(&ws.root()).unwrap_err();

    assert_eq!(err.step(), Some(Step::AddRepositories));
    assert!(matches!(err.root(), Error::RepositoriesNotList { .. }));
    assert_eq!(ws.top_level(), vec!["composer.json", "index.php"]);
    assert!(runner.calls().is_empty());
}

#[test]
fn existing_invoker_is_allowed_by_default() {
    let ws = TestWorkspace::new();
    ws.write(
        "composer.json",
        r#"{"require": {"google/function-invoker": "^0.1"}}"#,
    );
    let runner = copying_runner();
    let converter = Converter::new(config_for(&ws), &runner).unwrap();

    converter.run(&ws.root()).unwrap();

    assert_eq!(runner.names(), vec!["cp", "composer"]);
}

#[test]
fn existing_invoker_fails_under_fail_policy() {
    let ws = TestWorkspace::new();
    let original = r#"{"require-dev": {"google/function-invoker": "^0.1"}}"#;
    ws.write("composer.json", original);
    let runner = copying_runner();
    let config = ConvertConfig {
        existing_dependency: ExistingDependencyPolicy::Fail,
        ..config_for(&ws)
    };
    let converter = Converter::new(config, &runner).unwrap();

    let err = converter.run(&ws.root()).unwrap_err();

    assert_eq!(err.step(), Some(Step::CheckDependencies));
    assert!(matches!(
        err.root(),
        Error::DependencyAlreadyDeclared { section: "require-dev", .. }
    ));
    assert_eq!(ws.read("composer.json"), original);
    assert!(runner.calls().is_empty());
}

#[test]
fn malformed_manifest_under_fail_policy_is_a_repository_error() {
    let ws = TestWorkspace::new();
    ws.write("composer.json", "{not json");
    let runner = copying_runner();
    let config = ConvertConfig {
        existing_dependency: ExistingDependencyPolicy::Fail,
        ..config_for(&ws)
    };
    let converter = Converter::new(config, &runner).unwrap();

    let err = converter.run(&ws.root()).unwrap_err();

    assert_eq!(err.step(), Some(Step::AddRepositories));
    assert!(matches!(err.root(), Error::ManifestFormat { .. }));
    assert_eq!(ws.read("composer.json"), "{not json");
    assert!(runner.calls().is_empty());
}

#[test]
fn renamed_invoker_dir_moves_repository_url() {
    let ws = TestWorkspace::new();
    ws.write("index.php", "<?php");
    let runner = copying_runner();
    let config = ConvertConfig {
        invoker_dir: "vendor-invoker".into(),
        ..config_for(&ws)
    };
    let converter = Converter::new(config, &runner).unwrap();

    converter.run(&ws.root()).unwrap();

    assert_eq!(ws.top_level(), vec!["app", "vendor-invoker"]);
    assert_eq!(
        ws.read_json("app/composer.json")["repositories"][0]["url"],
        json!("../vendor-invoker")
    );
    assert_eq!(runner.calls()[0].args[2], "vendor-invoker");
}

#[test]
fn custom_layout_from_config() {
    let ws = TestWorkspace::new();
    ws.write("index.php", "<?php");
    let runner = copying_runner();
    let config = ConvertConfig {
        app_dir: "src".into(),
        invoker_dir: "vendor-invoker".into(),
        ..config_for(&ws)
    };
    let converter = Converter::new(config, &runner).unwrap();

    converter.run(&ws.root()).unwrap();

    assert_eq!(ws.top_level(), vec!["src", "vendor-invoker"]);
    assert_eq!(
        ws.read_json("src/composer.json")["repositories"][0]["url"],
        json!("../vendor-invoker")
    );
    assert_eq!(runner.calls()[1].current_dir, ws.root().join("src"));
}
