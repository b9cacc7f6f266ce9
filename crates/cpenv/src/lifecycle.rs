// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

//! Environment lifecycle: create, remove, activate, deactivate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::activation::{environment_activation, environment_deactivation, ActivationScript};
use crate::environment::Environment;
use crate::locate::EnvReference;
use crate::registry::{ApiVersion, Registry};

#[cfg(test)]
#[path = "./lifecycle_test.rs"]
mod lifecycle_test;

/// Optional configuration consumed at environment creation.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EnvConfig {
    /// API version identifier.
    #[serde(default)]
    pub api: ApiVersion,

    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Modules to import into the new environment.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<ModuleImport>,
}

/// One module import request from an environment config.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModuleImport {
    pub name: String,
    pub repo: String,
}

impl EnvConfig {
    /// Load a creation config, failing when the path does not exist.
    pub fn load(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Err(crate::Error::ConfigNotFound(path.to_path_buf()));
        }

        let yaml = std::fs::read_to_string(path).map_err(|e| crate::Error::ReadFailed {
            path: path.to_path_buf(),
            error: e,
        })?;

        serde_yaml::from_str(&yaml).map_err(|e| crate::Error::InvalidYaml {
            error: e,
            path: path.to_path_buf(),
        })
    }
}

/// Create and register a new environment, returning it together with its
/// activation script so a newly created environment is immediately
/// usable.
///
/// Nothing is persisted until every validation has passed: a missing
/// config, a bad module repo, or a duplicate name/root all fail before
/// the registry or filesystem change.
pub fn create_environment(
    registry: &mut dyn Registry,
    reference: &EnvReference,
    envs_root: &Path,
    config: Option<&Path>,
) -> crate::Result<(Environment, ActivationScript)> {
    let config = config.map(EnvConfig::load).transpose()?;

    let name = reference.implied_name()?;
    let root = match reference {
        EnvReference::Path(path) => path.clone(),
        EnvReference::Name(name) => envs_root.join(name),
    };

    if !registry.find_by_name(&name).is_empty() || registry.get_by_root(&root).is_some() {
        return Err(crate::Error::DuplicateEnvironment { name, root });
    }

    let mut env = Environment::new(name, root);

    if let Some(config) = config {
        env.description = config.description;
        for import in &config.modules {
            let module = crate::module::import_module(&import.repo, &import.name)?;
            env.add_module(module)?;
        }
    }

    std::fs::create_dir_all(env.root.join("bin"))?;
    registry.insert(env.clone())?;

    tracing::info!(name = %env.name, root = %env.root.display(), "environment created");
    let activation = environment_activation(&env);
    Ok((env, activation))
}

/// Delete an already-confirmed, already-uniquely-resolved environment.
///
/// Unconditional once invoked; confirmation belongs to the front end.
/// Fails with `EnvironmentNotFound` when the entry vanished since it was
/// resolved.
pub fn remove_environment(registry: &mut dyn Registry, env: &Environment) -> crate::Result<()> {
    registry.delete(env)?;

    if env.root.is_dir() {
        std::fs::remove_dir_all(&env.root)?;
    }

    tracing::info!(name = %env.name, root = %env.root.display(), "environment removed");
    Ok(())
}

/// Project an environment to its activation script. Pure; no persisted
/// state changes.
pub fn activate(env: &Environment) -> ActivationScript {
    environment_activation(env)
}

/// Produce the script that reverses the active environment's activation.
pub fn deactivate(active: Option<&Environment>) -> crate::Result<ActivationScript> {
    let env = active.ok_or(crate::Error::NoActiveEnvironment)?;
    Ok(environment_deactivation(env))
}

/// Default root directory for name-referenced environments under a cpenv
/// home directory.
pub fn environments_root(home: &Path) -> PathBuf {
    home.join("environments")
}
