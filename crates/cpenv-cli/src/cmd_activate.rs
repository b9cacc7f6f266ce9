// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `cpenv activate` command.

use clap::Args;
use colored::Colorize;
use miette::Result;

use cpenv::{EnvReference, Registry, Resolution};

/// Print an activation script (or list environments)
#[derive(Debug, Args)]
pub struct CmdActivate {
    /// Environment name or root path (module name with --module)
    name_or_path: Option<String>,

    /// Activate an application module of the active environment
    #[clap(long)]
    module: bool,

    /// Store selection flags
    #[clap(flatten)]
    store: crate::StoreFlags,

    /// Shell selection flags
    #[clap(flatten)]
    shell: crate::ShellFlags,
}

impl CmdActivate {
    pub fn run(&mut self) -> Result<i32> {
        let registry = self.store.open_registry()?;
        let shell = self.shell.resolve();

        let Some(raw) = &self.name_or_path else {
            if self.module {
                let active = crate::active_environment(&registry)
                    .ok_or(cpenv::Error::NoActiveEnvironment)?;
                print!("{}", crate::cmd_list::render_modules(&active));
            } else {
                print!("{}", crate::cmd_list::render_environments(&registry.all()));
            }
            return Ok(0);
        };

        if self.module {
            let active =
                crate::active_environment(&registry).ok_or(cpenv::Error::NoActiveEnvironment)?;
            let module = active.module(raw)?;
            print!("{}", shell.render(&cpenv::module_activation(module)));
            return Ok(0);
        }

        let reference = EnvReference::parse(raw);
        match cpenv::resolve_environment(&registry, &reference) {
            Resolution::None => {
                println!("No environment matches '{}'...", reference);
                print!("{}", crate::cmd_list::render_environments(&registry.all()));
                Ok(0)
            }
            Resolution::Ambiguous(candidates) => {
                // Hard stop: report every candidate, activate nothing.
                println!("More than one environment matches '{}':", reference);
                println!();
                for env in &candidates {
                    println!("    [{}] {}", env.name.cyan(), env.root.display());
                }
                Ok(0)
            }
            Resolution::Unique(env) => {
                tracing::info!(name = %env.name, "activating environment");
                print!("{}", shell.render(&cpenv::activate(&env)));
                Ok(0)
            }
        }
    }
}
