// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use std::path::PathBuf;

use super::*;

fn module(name: &str) -> AppModule {
    AppModule {
        name: name.to_string(),
        command: format!("{name} --run"),
        repo: PathBuf::from("/repos").join(name),
    }
}

#[rstest]
fn test_add_module_rejects_duplicate_name() {
    let mut env = Environment::new("film_a", "/projects/film_a");
    env.add_module(module("maya2016")).unwrap();

    let result = env.add_module(module("maya2016"));
    match result {
        Err(crate::Error::DuplicateModule { name }) => assert_eq!(name, "maya2016"),
        other => panic!("Expected DuplicateModule, got: {:?}", other),
    }

    // The rejected add left the module set untouched.
    assert_eq!(env.module_names(), vec!["maya2016"]);
}

#[rstest]
fn test_modules_iterate_in_insertion_order() {
    let mut env = Environment::new("film_a", "/projects/film_a");
    env.add_module(module("nuke11")).unwrap();
    env.add_module(module("maya2016")).unwrap();
    env.add_module(module("houdini18")).unwrap();

    let names: Vec<&str> = env.modules().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["nuke11", "maya2016", "houdini18"]);

    // Restartable: a second pass yields the same sequence.
    let again: Vec<&str> = env.modules().map(|m| m.name.as_str()).collect();
    assert_eq!(again, names);
}

#[rstest]
fn test_module_lookup_is_exact_and_case_sensitive() {
    let mut env = Environment::new("film_a", "/projects/film_a");
    env.add_module(module("maya2016")).unwrap();

    assert!(env.module("maya2016").is_ok());
    assert!(env.module("MAYA2016").is_err());
    assert!(env.module("maya").is_err());
}

#[rstest]
fn test_module_not_found_reports_listing() {
    let mut env = Environment::new("film_a", "/projects/film_a");
    env.add_module(module("maya2016")).unwrap();

    match env.module("nonexistent_module") {
        Err(crate::Error::ModuleNotFound { name, available }) => {
            assert_eq!(name, "nonexistent_module");
            assert_eq!(available, vec!["maya2016"]);
        }
        other => panic!("Expected ModuleNotFound, got: {:?}", other),
    }
}

#[rstest]
fn test_remove_module_returns_entry() {
    let mut env = Environment::new("film_a", "/projects/film_a");
    env.add_module(module("maya2016")).unwrap();
    env.add_module(module("nuke11")).unwrap();

    let removed = env.remove_module("maya2016").unwrap();
    assert_eq!(removed.name, "maya2016");
    assert_eq!(env.module_names(), vec!["nuke11"]);

    assert!(env.remove_module("maya2016").is_err());
}
