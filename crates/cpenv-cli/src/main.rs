// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

//! cpenv - Environment and Application Module Manager CLI

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::Result;

use cpenv::{Environment, FileRegistry, Registry, Shell};

mod cmd_activate;
mod cmd_create;
mod cmd_deactivate;
mod cmd_launch;
mod cmd_list;
mod cmd_remove;

use cmd_activate::CmdActivate;
use cmd_create::CmdCreate;
use cmd_deactivate::CmdDeactivate;
use cmd_launch::CmdLaunch;
use cmd_list::CmdList;
use cmd_remove::CmdRemove;

#[derive(Parser)]
#[clap(
    name = "cpenv",
    about = "Environment and Application Module Manager",
    version,
    long_about = "Resolve, activate, and launch named environments and their application modules"
)]
struct Opt {
    #[clap(flatten)]
    logging: Logging,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
struct Logging {
    /// Increase verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[clap(short, long)]
    quiet: bool,
}

/// Registry and home directory selection flags.
#[derive(Parser, Clone, Debug, Default)]
pub struct StoreFlags {
    /// cpenv home directory holding the registry and managed environments
    #[clap(long, env = "CPENV_HOME")]
    pub home: Option<PathBuf>,

    /// Registry file location (defaults to <home>/registry.yaml)
    #[clap(long, env = "CPENV_REGISTRY")]
    pub registry: Option<PathBuf>,
}

impl StoreFlags {
    pub fn home_dir(&self) -> Result<PathBuf> {
        if let Some(home) = &self.home {
            return Ok(home.clone());
        }
        dirs::home_dir().map(|h| h.join(".cpenv")).ok_or_else(|| {
            miette::miette!("Cannot determine a home directory; pass --home or set CPENV_HOME")
        })
    }

    pub fn open_registry(&self) -> Result<FileRegistry> {
        let path = match &self.registry {
            Some(path) => path.clone(),
            None => self.home_dir()?.join(cpenv::REGISTRY_FILENAME),
        };
        Ok(FileRegistry::open(path)?)
    }

    pub fn environments_root(&self) -> Result<PathBuf> {
        Ok(cpenv::environments_root(&self.home_dir()?))
    }
}

/// Shell dialect selection flags.
#[derive(Parser, Clone, Debug, Default)]
pub struct ShellFlags {
    /// Shell dialect for emitted scripts: bash, zsh, fish
    #[clap(long, env = "CPENV_SHELL")]
    pub shell: Option<String>,
}

impl ShellFlags {
    pub fn resolve(&self) -> Shell {
        let name = self.shell.clone().or_else(|| {
            std::env::var("SHELL").ok().and_then(|path| {
                Path::new(&path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            })
        });

        match name {
            Some(name) => Shell::from_name(&name).unwrap_or_else(|| {
                eprintln!(
                    "Unknown shell '{}'; defaulting to {}.",
                    name,
                    Shell::Bash.as_str()
                );
                Shell::Bash
            }),
            None => Shell::Bash,
        }
    }
}

/// Read the ambient active-environment signal once and resolve it
/// against the registry. Everything downstream receives the result as an
/// explicit value.
pub(crate) fn active_environment(registry: &dyn Registry) -> Option<Environment> {
    let root = std::env::var(cpenv::ACTIVE_ROOT_VAR).ok()?;
    let env = registry.get_by_root(Path::new(&root));
    if env.is_none() {
        tracing::warn!(root = %root, "active environment is not in the registry");
    }
    env
}

#[derive(Subcommand)]
enum Command {
    /// Create a new environment, or add a module with --module
    Create(CmdCreate),

    /// Remove an environment, or a module with --module
    Remove(CmdRemove),

    /// Print an activation script (or list environments)
    Activate(CmdActivate),

    /// Print the script reversing the current activation
    Deactivate(CmdDeactivate),

    /// Launch an application module (or list modules)
    Launch(CmdLaunch),

    /// List environments or the active environment's modules
    List(CmdList),
}

impl Opt {
    fn run(self) -> Result<i32> {
        // Setup logging
        let log_level = match (self.logging.quiet, self.logging.verbose) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::INFO,
            (false, 2) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        };

        tracing_subscriber::fmt().with_max_level(log_level).init();

        // Dispatch to command
        match self.cmd {
            Command::Create(mut cmd) => cmd.run(),
            Command::Remove(mut cmd) => cmd.run(),
            Command::Activate(mut cmd) => cmd.run(),
            Command::Deactivate(mut cmd) => cmd.run(),
            Command::Launch(mut cmd) => cmd.run(),
            Command::List(mut cmd) => cmd.run(),
        }
    }
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    let code = opt.run()?;
    std::process::exit(code);
}
