// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `cpenv remove` command.

use std::io::Write;
use std::path::Path;

use clap::Args;
use colored::Colorize;
use miette::Result;

use cpenv::{EnvReference, Registry, Resolution};

/// Remove an environment, or a module with --module
#[derive(Debug, Args)]
pub struct CmdRemove {
    /// Environment name or root path (module name with --module)
    name_or_path: String,

    /// Remove an application module from the active environment instead
    #[clap(long)]
    module: bool,

    /// Skip the confirmation prompt
    #[clap(short = 'y', long)]
    yes: bool,

    /// Store selection flags
    #[clap(flatten)]
    store: crate::StoreFlags,
}

impl CmdRemove {
    pub fn run(&mut self) -> Result<i32> {
        let mut registry = self.store.open_registry()?;

        if self.module {
            return self.remove_module(&mut registry);
        }

        let reference = EnvReference::parse(&self.name_or_path);
        match cpenv::resolve_environment(&registry, &reference) {
            Resolution::None => {
                println!("No environment matches '{}'...", reference);
                print!("{}", crate::cmd_list::render_environments(&registry.all()));
                Ok(0)
            }
            Resolution::Ambiguous(candidates) => {
                println!("More than one environment matches '{}':", reference);
                println!();
                for env in &candidates {
                    println!("    [{}] {}", env.name.cyan(), env.root.display());
                }
                Ok(0)
            }
            Resolution::Unique(env) => {
                if !self.yes && !confirm_removal(&env.root) {
                    println!("Aborted.");
                    return Ok(0);
                }

                cpenv::remove_environment(&mut registry, &env)?;
                println!("Removed environment '{}' ({})", env.name, env.root.display());
                Ok(0)
            }
        }
    }

    fn remove_module(&self, registry: &mut cpenv::FileRegistry) -> Result<i32> {
        let mut active =
            crate::active_environment(&*registry).ok_or(cpenv::Error::NoActiveEnvironment)?;

        let name = match cpenv::resolve_module(&active, &self.name_or_path) {
            Resolution::None => {
                println!("No module named '{}'...", self.name_or_path);
                print!("{}", crate::cmd_list::render_modules(&active));
                return Ok(0);
            }
            Resolution::Ambiguous(candidates) => {
                println!("More than one module matches '{}':", self.name_or_path);
                println!();
                for module in &candidates {
                    println!("    [{}] {}", module.name.cyan(), module.command);
                }
                return Ok(0);
            }
            Resolution::Unique(module) => module.name.clone(),
        };

        cpenv::remove_module(registry, &mut active, &name)?;
        println!("Removed module '{}' from '{}'", name, active.name);
        Ok(0)
    }
}

/// Blocking confirmation read. Exactly the line `y` confirms; anything
/// else, including empty input or EOF, aborts.
fn confirm_removal(root: &Path) -> bool {
    print!("Delete {}? (y/n) ", root.display());
    let _ = std::io::stdout().flush();

    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    line.trim_end_matches(['\r', '\n']) == "y"
}
