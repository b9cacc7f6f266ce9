// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

//! Application module import and lifecycle operations.
//!
//! Every operation here is scoped to an already-resolved active
//! environment, passed in explicitly by the front end.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::environment::{AppModule, Environment};
use crate::launch::Launcher;
use crate::registry::{ApiVersion, Registry};
use crate::MODULE_FILENAME;

#[cfg(test)]
#[path = "./module_test.rs"]
mod module_test;

/// Module definition loaded from a repository's module.yaml.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModuleSpec {
    /// API version identifier.
    #[serde(default)]
    pub api: ApiVersion,

    /// Command handed to the process launcher.
    pub command: String,

    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ModuleSpec {
    /// Parse a module spec from YAML text.
    pub fn from_yaml(yaml: &str, path: &Path) -> crate::Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| crate::Error::InvalidYaml {
            error: e,
            path: path.to_path_buf(),
        })
    }
}

/// Import a module definition from a repository directory.
///
/// The repository must contain a readable `module.yaml`; the repo path
/// may be absolute, relative, or home-relative (`~/`).
pub fn import_module(repo: &str, name: &str) -> crate::Result<AppModule> {
    let repo = resolve_repo_path(repo)?;
    let spec_path = repo.join(MODULE_FILENAME);

    let yaml = std::fs::read_to_string(&spec_path).map_err(|e| crate::Error::ReadFailed {
        path: spec_path.clone(),
        error: e,
    })?;

    let spec = ModuleSpec::from_yaml(&yaml, &spec_path)?;

    Ok(AppModule {
        name: name.to_string(),
        command: spec.command,
        repo,
    })
}

/// Resolve a repository reference to a canonical directory on disk.
fn resolve_repo_path(repo: &str) -> crate::Result<PathBuf> {
    let path = if repo.starts_with('~') {
        let home = dirs::home_dir().ok_or_else(|| {
            crate::Error::ReadFailed {
                path: PathBuf::from(repo),
                error: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "cannot resolve ~ without HOME",
                ),
            }
        })?;
        let rel = repo.strip_prefix("~/").unwrap_or(repo);
        home.join(rel)
    } else {
        PathBuf::from(repo)
    };

    dunce::canonicalize(&path).map_err(|e| crate::Error::ModuleRepoNotFound {
        path: path.clone(),
        error: e,
    })
}

/// Import a module into the active environment and persist the change.
///
/// Fails with `DuplicateModule` before anything is persisted; the
/// registry entry either gains the module or stays untouched.
pub fn add_module(
    registry: &mut dyn Registry,
    env: &mut Environment,
    repo: &str,
    name: &str,
) -> crate::Result<()> {
    let module = import_module(repo, name)?;
    env.add_module(module)?;
    registry.update(env)?;

    tracing::info!(module = name, environment = %env.name, "module added");
    Ok(())
}

/// Remove an already-disambiguated module by exact name and persist.
pub fn remove_module(
    registry: &mut dyn Registry,
    env: &mut Environment,
    name: &str,
) -> crate::Result<AppModule> {
    let removed = env.remove_module(name)?;
    registry.update(env)?;

    tracing::info!(module = name, environment = %env.name, "module removed");
    Ok(removed)
}

/// Launch a module by exact, case-sensitive name.
///
/// No ambiguity tolerance here: the name either matches one loaded
/// module or the failure reports the full listing.
pub fn launch_module(
    env: &Environment,
    name: &str,
    launcher: &dyn Launcher,
) -> crate::Result<i32> {
    let module = env.module(name)?;
    launcher.launch(&module.command)
}
