// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

//! Process launching for application modules.

use std::process::{Command, Stdio};

#[cfg(test)]
#[path = "./launch_test.rs"]
mod launch_test;

/// Runs a module command and reports its exit status.
pub trait Launcher {
    fn launch(&self, command: &str) -> crate::Result<i32>;
}

/// Launcher that spawns the command as a child process with inherited
/// standard streams and blocks until it exits.
#[derive(Debug, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, command: &str) -> crate::Result<i32> {
        // Whitespace split; quoting inside module commands is not
        // interpreted.
        let mut words = command.split_whitespace();
        let program = words.next().ok_or_else(|| crate::Error::LaunchFailed {
            command: command.to_string(),
            error: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
        })?;

        tracing::info!(command, "launching module command");

        let status = Command::new(program)
            .args(words)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| crate::Error::LaunchFailed {
                command: command.to_string(),
                error: e,
            })?;

        Ok(status.code().unwrap_or(1))
    }
}
