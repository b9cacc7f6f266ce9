// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for cpenv operations.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience Result type with cpenv Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during cpenv operations.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Configuration file passed to create does not exist
    #[error("Configuration file not found: {0:?}")]
    #[diagnostic(
        code(cpenv::config_not_found),
        help("Check the --config path, or omit it to create a bare environment")
    )]
    ConfigNotFound(PathBuf),

    /// Environment name or root already registered
    #[error("Environment '{name}' at {root:?} collides with an existing entry")]
    #[diagnostic(
        code(cpenv::duplicate_environment),
        help("Environment names and roots must be unique; pick another or remove the existing one")
    )]
    DuplicateEnvironment { name: String, root: PathBuf },

    /// Module name already present in the environment
    #[error("A module named '{name}' already exists in this environment")]
    #[diagnostic(code(cpenv::duplicate_module))]
    DuplicateModule { name: String },

    /// Environment vanished between resolution and mutation
    #[error("Environment '{name}' is no longer registered")]
    #[diagnostic(
        code(cpenv::environment_not_found),
        help("Another process may have removed it; run 'cpenv list' to see what remains")
    )]
    EnvironmentNotFound { name: String },

    /// No module with the requested name in the active environment
    #[error("Application module named '{name}' does not exist")]
    #[diagnostic(
        code(cpenv::module_not_found),
        help("{}", module_listing(available))
    )]
    ModuleNotFound {
        name: String,
        available: Vec<String>,
    },

    /// Module repository missing or unreadable
    #[error("Module repository not usable: {path:?}")]
    #[diagnostic(
        code(cpenv::module_repo_not_found),
        help("The repository must be a readable directory containing a module.yaml file")
    )]
    ModuleRepoNotFound {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Operation requires an active environment
    #[error("No active environment")]
    #[diagnostic(
        code(cpenv::no_active_environment),
        help("Activate one first: cpenv activate <name_or_path>")
    )]
    NoActiveEnvironment,

    /// Reference string cannot identify an environment
    #[error("Cannot derive an environment name from '{0}'")]
    #[diagnostic(code(cpenv::invalid_reference))]
    InvalidReference(String),

    /// Invalid YAML in a registry, config, or module file
    #[error("Invalid YAML in {path:?}: {error}")]
    #[diagnostic(
        code(cpenv::invalid_yaml),
        help("Check YAML syntax and document structure")
    )]
    InvalidYaml {
        #[source]
        error: serde_yaml::Error,
        path: PathBuf,
    },

    /// Failed to read file
    #[error("Failed to read file: {path:?}")]
    #[diagnostic(code(cpenv::read_failed))]
    ReadFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Failed to spawn a module command
    #[error("Failed to launch '{command}'")]
    #[diagnostic(
        code(cpenv::launch_failed),
        help("Make sure the command exists on PATH inside the activated environment")
    )]
    LaunchFailed {
        command: String,
        #[source]
        error: std::io::Error,
    },

    /// IO error passthrough
    #[error(transparent)]
    #[diagnostic(code(cpenv::io_error))]
    Io(#[from] std::io::Error),
}

fn module_listing(available: &[String]) -> String {
    if available.is_empty() {
        "No modules are loaded; add one with 'cpenv create --module <name> <repo>'".to_string()
    } else {
        format!("Available modules: {}", available.join(", "))
    }
}
