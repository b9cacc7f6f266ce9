// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `cpenv launch` command.

use clap::Args;
use miette::Result;

use cpenv::ProcessLauncher;

/// Launch an application module (or list modules)
#[derive(Debug, Args)]
pub struct CmdLaunch {
    /// Module name, exact and case-sensitive
    module_name: Option<String>,

    /// Store selection flags
    #[clap(flatten)]
    store: crate::StoreFlags,
}

impl CmdLaunch {
    pub fn run(&mut self) -> Result<i32> {
        let registry = self.store.open_registry()?;
        let active =
            crate::active_environment(&registry).ok_or(cpenv::Error::NoActiveEnvironment)?;

        let Some(name) = &self.module_name else {
            print!("{}", crate::cmd_list::render_modules(&active));
            return Ok(0);
        };

        let status = cpenv::launch_module(&active, name, &ProcessLauncher)?;
        Ok(status)
    }
}
