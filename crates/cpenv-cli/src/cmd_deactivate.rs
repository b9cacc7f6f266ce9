// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `cpenv deactivate` command.

use clap::Args;
use miette::Result;

/// Print the script reversing the current activation
#[derive(Debug, Args)]
pub struct CmdDeactivate {
    /// Store selection flags
    #[clap(flatten)]
    store: crate::StoreFlags,

    /// Shell selection flags
    #[clap(flatten)]
    shell: crate::ShellFlags,
}

impl CmdDeactivate {
    pub fn run(&mut self) -> Result<i32> {
        let registry = self.store.open_registry()?;
        let active = crate::active_environment(&registry);

        let script = cpenv::deactivate(active.as_ref())?;
        print!("{}", self.shell.resolve().render(&script));
        Ok(0)
    }
}
