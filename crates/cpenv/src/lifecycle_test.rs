// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use tempfile::TempDir;

use super::*;
use crate::activation::ShellOp;
use crate::locate::{resolve_environment, Resolution};
use crate::registry::FileRegistry;

fn open_registry(tmp: &TempDir) -> FileRegistry {
    FileRegistry::open(tmp.path().join("registry.yaml")).unwrap()
}

#[rstest]
fn test_create_by_path() {
    let tmp = TempDir::new().unwrap();
    let mut registry = open_registry(&tmp);
    let root = tmp.path().join("foo");

    let reference = EnvReference::parse(root.to_str().unwrap());
    let (env, script) =
        create_environment(&mut registry, &reference, tmp.path(), None).unwrap();

    assert_eq!(env.name, "foo");
    assert_eq!(env.root, root);
    assert!(root.join("bin").is_dir());

    let envs = registry.all();
    assert_eq!(envs.len(), 1);
    assert_eq!(envs[0].name, "foo");

    // The activation script references the new root.
    let root_str = root.display().to_string();
    assert!(script.ops().iter().any(|op| matches!(
        op,
        ShellOp::Set { var, value } if var == crate::ACTIVE_ROOT_VAR && *value == root_str
    )));
}

#[rstest]
fn test_create_by_name_uses_environments_root() {
    let tmp = TempDir::new().unwrap();
    let mut registry = open_registry(&tmp);
    let envs_root = environments_root(tmp.path());

    let (env, _) = create_environment(
        &mut registry,
        &EnvReference::parse("film_a"),
        &envs_root,
        None,
    )
    .unwrap();

    assert_eq!(env.root, envs_root.join("film_a"));
    assert!(env.root.is_dir());
}

#[rstest]
fn test_create_with_missing_config() {
    let tmp = TempDir::new().unwrap();
    let mut registry = open_registry(&tmp);
    let missing = tmp.path().join("no_such_config.yaml");

    let result = create_environment(
        &mut registry,
        &EnvReference::parse("film_a"),
        tmp.path(),
        Some(&missing),
    );

    match result {
        Err(crate::Error::ConfigNotFound(path)) => assert_eq!(path, missing),
        other => panic!("Expected ConfigNotFound, got: {:?}", other),
    }
    assert!(registry.all().is_empty());
}

#[rstest]
fn test_create_with_config_imports_modules() {
    let tmp = TempDir::new().unwrap();
    let mut registry = open_registry(&tmp);

    let repo = tmp.path().join("maya_module");
    std::fs::create_dir_all(&repo).unwrap();
    std::fs::write(
        repo.join(crate::MODULE_FILENAME),
        "api: cpenv/v0\ncommand: maya\n",
    )
    .unwrap();

    let config_path = tmp.path().join("film.yaml");
    std::fs::write(
        &config_path,
        format!(
            "api: cpenv/v0\ndescription: Feature work\nmodules:\n  - name: maya2016\n    repo: {}\n",
            repo.display()
        ),
    )
    .unwrap();

    let (env, _) = create_environment(
        &mut registry,
        &EnvReference::parse("film_a"),
        tmp.path(),
        Some(&config_path),
    )
    .unwrap();

    assert_eq!(env.description.as_deref(), Some("Feature work"));
    assert_eq!(env.module_names(), vec!["maya2016"]);
    assert_eq!(registry.find_by_name("film_a")[0].module_names(), vec!["maya2016"]);
}

#[rstest]
fn test_create_duplicate_fails_before_mutation() {
    let tmp = TempDir::new().unwrap();
    let mut registry = open_registry(&tmp);

    create_environment(
        &mut registry,
        &EnvReference::parse("film_a"),
        tmp.path(),
        None,
    )
    .unwrap();

    let result = create_environment(
        &mut registry,
        &EnvReference::parse("film_a"),
        tmp.path(),
        None,
    );
    assert!(matches!(
        result,
        Err(crate::Error::DuplicateEnvironment { .. })
    ));
    assert_eq!(registry.all().len(), 1);
}

#[rstest]
fn test_remove_deletes_entry_and_root() {
    let tmp = TempDir::new().unwrap();
    let mut registry = open_registry(&tmp);

    let (env, _) = create_environment(
        &mut registry,
        &EnvReference::parse("film_a"),
        tmp.path(),
        None,
    )
    .unwrap();
    assert!(env.root.is_dir());

    remove_environment(&mut registry, &env).unwrap();
    assert!(registry.all().is_empty());
    assert!(!env.root.exists());
}

#[rstest]
fn test_remove_reports_vanished_environment() {
    let tmp = TempDir::new().unwrap();
    let mut registry = open_registry(&tmp);

    // Resolved earlier, deleted by another process since.
    let env = Environment::new("film_a", tmp.path().join("film_a"));
    let result = remove_environment(&mut registry, &env);
    assert!(matches!(
        result,
        Err(crate::Error::EnvironmentNotFound { .. })
    ));
}

#[rstest]
fn test_activate_is_pure() {
    let tmp = TempDir::new().unwrap();
    let mut registry = open_registry(&tmp);

    let (env, _) = create_environment(
        &mut registry,
        &EnvReference::parse("film_a"),
        tmp.path(),
        None,
    )
    .unwrap();

    let before = registry.all();
    let script = activate(&env);
    assert!(!script.is_empty());
    assert_eq!(registry.all(), before);
}

#[rstest]
fn test_ambiguous_path_resolution_activates_nothing() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("registry.yaml");
    std::fs::write(
        &path,
        r#"
api: cpenv/v0
environments:
  - name: foo
    root: /projects/a/foo
  - name: foo
    root: /projects/b/foo
"#,
    )
    .unwrap();
    let registry = FileRegistry::open(&path).unwrap();

    match resolve_environment(&registry, &EnvReference::parse("foo")) {
        Resolution::Ambiguous(candidates) => {
            let roots: Vec<_> = candidates.iter().map(|e| e.root.clone()).collect();
            assert_eq!(
                roots,
                vec![
                    PathBuf::from("/projects/a/foo"),
                    PathBuf::from("/projects/b/foo")
                ]
            );
        }
        other => panic!("Expected Ambiguous, got: {:?}", other),
    }
}

#[rstest]
fn test_deactivate_without_active_environment() {
    let result = deactivate(None);
    assert!(matches!(result, Err(crate::Error::NoActiveEnvironment)));
}

#[rstest]
fn test_deactivate_reverses_activation() {
    let env = Environment::new("film_a", "/projects/film_a");
    let script = deactivate(Some(&env)).unwrap();
    assert_eq!(script, activate(&env).reversed());
}
