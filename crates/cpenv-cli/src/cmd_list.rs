// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `cpenv list` command.

use clap::Args;
use colored::Colorize;
use miette::Result;

use cpenv::{Environment, Registry};

/// List environments or the active environment's modules
#[derive(Debug, Args)]
pub struct CmdList {
    /// List the active environment's application modules
    #[clap(long)]
    apps: bool,

    /// Store selection flags
    #[clap(flatten)]
    store: crate::StoreFlags,
}

impl CmdList {
    pub fn run(&mut self) -> Result<i32> {
        let registry = self.store.open_registry()?;

        if self.apps {
            let active =
                crate::active_environment(&registry).ok_or(cpenv::Error::NoActiveEnvironment)?;
            print!("{}", render_modules(&active));
        } else {
            print!("{}", render_environments(&registry.all()));
        }

        Ok(0)
    }
}

pub(crate) fn render_environments(envs: &[Environment]) -> String {
    if envs.is_empty() {
        return format!(
            "No available environments...use create to make one:\n\n    {}\n",
            "cpenv create <name_or_path>".dimmed()
        );
    }

    let mut out = String::from("Available Environments:\n\n");
    for env in envs {
        out.push_str(&format!(
            "    [{}] {}\n",
            env.name.cyan(),
            env.root.display()
        ));
        if let Some(desc) = &env.description {
            out.push_str(&format!("        {}\n", desc.dimmed()));
        }
    }
    out.push_str(&format!(
        "\n{}\n",
        "cpenv activate <name_or_path>".dimmed()
    ));
    out
}

pub(crate) fn render_modules(env: &Environment) -> String {
    if env.modules().next().is_none() {
        return format!(
            "No application modules in '{}'...add one with:\n\n    {}\n",
            env.name,
            "cpenv create --module <name> <repo>".dimmed()
        );
    }

    let mut out = String::from("Available Application Modules:\n\n");
    for module in env.modules() {
        out.push_str(&format!(
            "    [{}] {}\n",
            module.name.cyan(),
            module.command
        ));
    }
    out.push_str(&format!("\n{}\n", "cpenv launch <module_name>".dimmed()));
    out
}
