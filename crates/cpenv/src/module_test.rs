// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use std::cell::RefCell;
use tempfile::TempDir;

use super::*;
use crate::registry::FileRegistry;

fn module_repo(tmp: &TempDir, dir: &str, command: &str) -> PathBuf {
    let repo = tmp.path().join(dir);
    std::fs::create_dir_all(&repo).unwrap();
    std::fs::write(
        repo.join(MODULE_FILENAME),
        format!("api: cpenv/v0\ncommand: {command}\n"),
    )
    .unwrap();
    repo
}

fn open_registry_with(tmp: &TempDir, env: &Environment) -> FileRegistry {
    let mut registry = FileRegistry::open(tmp.path().join("registry.yaml")).unwrap();
    registry.insert(env.clone()).unwrap();
    registry
}

/// Launcher that records commands instead of spawning processes.
struct RecordingLauncher {
    launched: RefCell<Vec<String>>,
    status: i32,
}

impl RecordingLauncher {
    fn new(status: i32) -> Self {
        Self {
            launched: RefCell::new(Vec::new()),
            status,
        }
    }
}

impl Launcher for RecordingLauncher {
    fn launch(&self, command: &str) -> crate::Result<i32> {
        self.launched.borrow_mut().push(command.to_string());
        Ok(self.status)
    }
}

#[rstest]
fn test_import_module_reads_spec() {
    let tmp = TempDir::new().unwrap();
    let repo = module_repo(&tmp, "maya_module", "maya -hideConsole");

    let module = import_module(repo.to_str().unwrap(), "maya2016").unwrap();
    assert_eq!(module.name, "maya2016");
    assert_eq!(module.command, "maya -hideConsole");
    assert_eq!(module.repo, dunce::canonicalize(&repo).unwrap());
}

#[rstest]
fn test_import_module_missing_repo() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("not_there");

    let result = import_module(missing.to_str().unwrap(), "maya2016");
    assert!(matches!(
        result,
        Err(crate::Error::ModuleRepoNotFound { .. })
    ));
}

#[rstest]
fn test_import_module_malformed_spec() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("broken_module");
    std::fs::create_dir_all(&repo).unwrap();
    std::fs::write(repo.join(MODULE_FILENAME), "command: [unclosed\n").unwrap();

    let result = import_module(repo.to_str().unwrap(), "broken");
    assert!(matches!(result, Err(crate::Error::InvalidYaml { .. })));
}

#[rstest]
fn test_add_module_persists_to_registry() {
    let tmp = TempDir::new().unwrap();
    let repo = module_repo(&tmp, "maya_module", "maya");
    let mut env = Environment::new("film_a", tmp.path().join("film_a"));
    let mut registry = open_registry_with(&tmp, &env);

    add_module(&mut registry, &mut env, repo.to_str().unwrap(), "maya2016").unwrap();

    let stored = &registry.find_by_name("film_a")[0];
    assert_eq!(stored.module_names(), vec!["maya2016"]);
}

#[rstest]
fn test_add_module_rejects_duplicate_before_persisting() {
    let tmp = TempDir::new().unwrap();
    let repo = module_repo(&tmp, "maya_module", "maya");
    let mut env = Environment::new("film_a", tmp.path().join("film_a"));
    let mut registry = open_registry_with(&tmp, &env);

    add_module(&mut registry, &mut env, repo.to_str().unwrap(), "maya2016").unwrap();
    let result = add_module(&mut registry, &mut env, repo.to_str().unwrap(), "maya2016");
    assert!(matches!(result, Err(crate::Error::DuplicateModule { .. })));

    // Still exactly one module in the stored entry.
    assert_eq!(registry.find_by_name("film_a")[0].module_names().len(), 1);
}

#[rstest]
fn test_remove_module_persists_to_registry() {
    let tmp = TempDir::new().unwrap();
    let repo = module_repo(&tmp, "maya_module", "maya");
    let mut env = Environment::new("film_a", tmp.path().join("film_a"));
    let mut registry = open_registry_with(&tmp, &env);
    add_module(&mut registry, &mut env, repo.to_str().unwrap(), "maya2016").unwrap();

    let removed = remove_module(&mut registry, &mut env, "maya2016").unwrap();
    assert_eq!(removed.name, "maya2016");
    assert!(registry.find_by_name("film_a")[0].module_names().is_empty());
}

#[rstest]
fn test_launch_module_exact_match() {
    let mut env = Environment::new("film_a", "/projects/film_a");
    env.add_module(AppModule {
        name: "maya2016".to_string(),
        command: "maya -hideConsole".to_string(),
        repo: "/repos/maya_module".into(),
    })
    .unwrap();

    let launcher = RecordingLauncher::new(3);
    let status = launch_module(&env, "maya2016", &launcher).unwrap();

    assert_eq!(status, 3);
    assert_eq!(
        launcher.launched.borrow().as_slice(),
        ["maya -hideConsole"]
    );
}

#[rstest]
fn test_launch_unknown_module_reports_listing() {
    let mut env = Environment::new("film_a", "/projects/film_a");
    env.add_module(AppModule {
        name: "maya2016".to_string(),
        command: "maya".to_string(),
        repo: "/repos/maya_module".into(),
    })
    .unwrap();

    let launcher = RecordingLauncher::new(0);
    match launch_module(&env, "nonexistent_module", &launcher) {
        Err(crate::Error::ModuleNotFound { name, available }) => {
            assert_eq!(name, "nonexistent_module");
            assert_eq!(available, vec!["maya2016"]);
        }
        other => panic!("Expected ModuleNotFound, got: {:?}", other),
    }
    assert!(launcher.launched.borrow().is_empty());
}
