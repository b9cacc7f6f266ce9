// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

//! Environment registry: the store of record for registered environments.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::environment::Environment;
use crate::locate::root_matches;

#[cfg(test)]
#[path = "./registry_test.rs"]
mod registry_test;

/// API version for registry documents.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub enum ApiVersion {
    #[serde(rename = "cpenv/v0")]
    V0,
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::V0
    }
}

/// Helper for two-stage deserialization to determine API version first.
#[derive(Deserialize)]
struct ApiVersionMapping {
    #[serde(default)]
    api: ApiVersion,
}

/// Store of registered environments.
///
/// `insert` must guarantee uniqueness of both `name` and `root`; lookups
/// are pure and an empty result set is a valid outcome.
pub trait Registry {
    /// All registered environments, in registry order.
    fn all(&self) -> Vec<Environment>;

    /// Environments matching a name exactly.
    fn find_by_name(&self, name: &str) -> Vec<Environment>;

    /// Environments whose root equals the query or lives underneath it.
    fn find_by_root(&self, root: &Path) -> Vec<Environment>;

    /// The environment rooted exactly at `root`, if any.
    fn get_by_root(&self, root: &Path) -> Option<Environment>;

    /// Register a new environment, rejecting duplicate names or roots.
    fn insert(&mut self, env: Environment) -> crate::Result<()>;

    /// Replace the stored entry with the same name.
    fn update(&mut self, env: &Environment) -> crate::Result<()>;

    /// Delete an environment from the registry.
    fn delete(&mut self, env: &Environment) -> crate::Result<()>;
}

/// On-disk registry document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct RegistryDoc {
    #[serde(default)]
    api: ApiVersion,

    #[serde(default)]
    environments: Vec<Environment>,
}

/// YAML-file-backed registry.
///
/// The document is loaded once at open and written back after every
/// mutation. A missing file is an empty registry, not an error.
#[derive(Debug)]
pub struct FileRegistry {
    path: PathBuf,
    doc: RegistryDoc,
}

impl FileRegistry {
    /// Open the registry document at `path`, creating an empty registry
    /// in memory when no file exists yet.
    pub fn open<P: Into<PathBuf>>(path: P) -> crate::Result<Self> {
        let path = path.into();

        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no registry file, starting empty");
            return Ok(Self {
                path,
                doc: RegistryDoc::default(),
            });
        }

        let yaml = std::fs::read_to_string(&path).map_err(|e| crate::Error::ReadFailed {
            path: path.clone(),
            error: e,
        })?;

        // Stage 1: Parse to get API version
        let value: serde_yaml::Value =
            serde_yaml::from_str(&yaml).map_err(|e| crate::Error::InvalidYaml {
                error: e,
                path: path.clone(),
            })?;

        let with_version: ApiVersionMapping =
            serde_yaml::from_value(value.clone()).map_err(|e| crate::Error::InvalidYaml {
                error: e,
                path: path.clone(),
            })?;

        // Stage 2: Deserialize based on version
        let doc = match with_version.api {
            ApiVersion::V0 => serde_yaml::from_value(value).map_err(|e| crate::Error::InvalidYaml {
                error: e,
                path: path.clone(),
            })?,
        };

        Ok(Self { path, doc })
    }

    /// The file backing this registry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> crate::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&self.doc).map_err(|e| crate::Error::InvalidYaml {
            error: e,
            path: self.path.clone(),
        })?;

        std::fs::write(&self.path, yaml)?;
        tracing::debug!(path = %self.path.display(), "registry saved");
        Ok(())
    }
}

impl Registry for FileRegistry {
    fn all(&self) -> Vec<Environment> {
        self.doc.environments.clone()
    }

    fn find_by_name(&self, name: &str) -> Vec<Environment> {
        self.doc
            .environments
            .iter()
            .filter(|e| e.name == name)
            .cloned()
            .collect()
    }

    fn find_by_root(&self, root: &Path) -> Vec<Environment> {
        self.doc
            .environments
            .iter()
            .filter(|e| root_matches(&e.root, root))
            .cloned()
            .collect()
    }

    fn get_by_root(&self, root: &Path) -> Option<Environment> {
        self.doc
            .environments
            .iter()
            .find(|e| e.root == root)
            .cloned()
    }

    fn insert(&mut self, env: Environment) -> crate::Result<()> {
        let collision = self
            .doc
            .environments
            .iter()
            .any(|e| e.name == env.name || e.root == env.root);
        if collision {
            return Err(crate::Error::DuplicateEnvironment {
                name: env.name,
                root: env.root,
            });
        }

        self.doc.environments.push(env);
        self.save()
    }

    fn update(&mut self, env: &Environment) -> crate::Result<()> {
        let index = self
            .doc
            .environments
            .iter()
            .position(|e| e.name == env.name)
            .ok_or_else(|| crate::Error::EnvironmentNotFound {
                name: env.name.clone(),
            })?;

        self.doc.environments[index] = env.clone();
        self.save()
    }

    fn delete(&mut self, env: &Environment) -> crate::Result<()> {
        let before = self.doc.environments.len();
        self.doc
            .environments
            .retain(|e| !(e.name == env.name && e.root == env.root));

        if self.doc.environments.len() == before {
            return Err(crate::Error::EnvironmentNotFound {
                name: env.name.clone(),
            });
        }

        self.save()
    }
}
