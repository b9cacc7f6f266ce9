// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

//! Environment and application module data types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "./environment_test.rs"]
mod environment_test;

/// A named, path-rooted environment and its ordered module collection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Environment {
    /// Registry-unique environment name.
    pub name: String,

    /// Registry-unique filesystem root.
    pub root: PathBuf,

    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Application modules in insertion order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    modules: Vec<AppModule>,
}

/// A launchable application module imported into an environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppModule {
    /// Environment-unique module name.
    pub name: String,

    /// Launch command handed to the process launcher.
    pub command: String,

    /// Repository directory the module was imported from.
    pub repo: PathBuf,
}

impl Environment {
    /// Create a new environment with no modules.
    pub fn new<N: Into<String>, R: Into<PathBuf>>(name: N, root: R) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            description: None,
            modules: Vec::new(),
        }
    }

    /// Add a module, rejecting a name already present in this environment.
    pub fn add_module(&mut self, module: AppModule) -> crate::Result<()> {
        if self.modules.iter().any(|m| m.name == module.name) {
            return Err(crate::Error::DuplicateModule { name: module.name });
        }
        self.modules.push(module);
        Ok(())
    }

    /// Remove a module by exact name, returning the removed entry.
    pub fn remove_module(&mut self, name: &str) -> crate::Result<AppModule> {
        match self.modules.iter().position(|m| m.name == name) {
            Some(index) => Ok(self.modules.remove(index)),
            None => Err(crate::Error::ModuleNotFound {
                name: name.to_string(),
                available: self.module_names(),
            }),
        }
    }

    /// Exact, case-sensitive module lookup.
    pub fn module(&self, name: &str) -> crate::Result<&AppModule> {
        self.modules
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| crate::Error::ModuleNotFound {
                name: name.to_string(),
                available: self.module_names(),
            })
    }

    /// Iterate modules in insertion order. The iterator is restartable;
    /// call again for a fresh pass.
    pub fn modules(&self) -> std::slice::Iter<'_, AppModule> {
        self.modules.iter()
    }

    /// Names of all loaded modules, in insertion order.
    pub fn module_names(&self) -> Vec<String> {
        self.modules.iter().map(|m| m.name.clone()).collect()
    }
}
