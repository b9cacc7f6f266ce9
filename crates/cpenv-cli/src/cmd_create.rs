// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `cpenv create` command.

use std::path::PathBuf;

use clap::Args;
use miette::Result;

use cpenv::EnvReference;

/// Create a new environment, or add a module with --module
#[derive(Debug, Args)]
pub struct CmdCreate {
    /// Environment name or root path (module name with --module)
    name_or_path: String,

    /// Module repository directory (with --module)
    module_repo: Option<String>,

    /// Add an application module to the active environment instead
    #[clap(long, requires = "module_repo")]
    module: bool,

    /// Configuration file consumed at creation
    #[clap(long)]
    config: Option<PathBuf>,

    /// Store selection flags
    #[clap(flatten)]
    store: crate::StoreFlags,

    /// Shell selection flags
    #[clap(flatten)]
    shell: crate::ShellFlags,
}

impl CmdCreate {
    pub fn run(&mut self) -> Result<i32> {
        let mut registry = self.store.open_registry()?;

        if self.module {
            // clap enforces module_repo whenever --module is set
            let repo = self.module_repo.as_deref().unwrap_or_default();
            let mut active =
                crate::active_environment(&registry).ok_or(cpenv::Error::NoActiveEnvironment)?;

            cpenv::add_module(&mut registry, &mut active, repo, &self.name_or_path)?;
            println!(
                "Added module '{}' to '{}'",
                self.name_or_path, active.name
            );
            return Ok(0);
        }

        let reference = EnvReference::parse(&self.name_or_path);
        tracing::info!(reference = %reference, "creating environment");

        let envs_root = self.store.environments_root()?;
        let (_, script) = cpenv::create_environment(
            &mut registry,
            &reference,
            &envs_root,
            self.config.as_deref(),
        )?;

        // Creation couples with activation: the new environment's script
        // goes straight to stdout for the caller's shell to source.
        print!("{}", self.shell.resolve().render(&script));
        Ok(0)
    }
}
