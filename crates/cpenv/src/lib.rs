// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

//! cpenv - Environment and Application Module Manager
//!
//! This crate provides the core library for resolving, activating, and
//! launching named environments and the application modules attached to
//! them. Activation never mutates the calling process: every activate or
//! deactivate operation projects to an ordered shell script that the
//! front end prints for the caller's shell to source.
//!
//! # Overview
//!
//! Environments are registered in a YAML registry document and identified
//! by a unique name and a unique root path. A user-supplied reference is
//! classified once as a path or a name, resolved against the registry,
//! and disambiguated into exactly one of: no match, a unique match, or an
//! ambiguous set that is reported rather than guessed at.
//!
//! # Example
//!
//! ```yaml
//! # registry.yaml
//! api: cpenv/v0
//! environments:
//!   - name: film_a
//!     root: /projects/film_a
//!     modules:
//!       - name: maya2016
//!         command: maya -hideConsole
//!         repo: /repos/maya_module
//! ```

pub mod activation;
pub mod environment;
pub mod error;
pub mod launch;
pub mod lifecycle;
pub mod locate;
pub mod module;
pub mod registry;

pub use activation::{
    environment_activation, environment_deactivation, module_activation, ActivationScript, Shell,
    ShellOp,
};
pub use environment::{AppModule, Environment};
pub use error::{Error, Result};
pub use launch::{Launcher, ProcessLauncher};
pub use lifecycle::{
    activate, create_environment, deactivate, environments_root, remove_environment, EnvConfig,
    ModuleImport,
};
pub use locate::{
    disambiguate, find_environments, resolve_environment, resolve_module, EnvReference, Resolution,
};
pub use module::{add_module, import_module, launch_module, remove_module, ModuleSpec};
pub use registry::{ApiVersion, FileRegistry, Registry};

/// Well-known filename for the environment registry document.
pub const REGISTRY_FILENAME: &str = "registry.yaml";

/// Well-known filename for module definitions inside a repository.
pub const MODULE_FILENAME: &str = "module.yaml";

/// Variable an activation script sets to record the active environment root.
pub const ACTIVE_ROOT_VAR: &str = "CPENV_ACTIVE_ROOT";

/// Variable an activation script sets to record the active environment name.
pub const ACTIVE_NAME_VAR: &str = "CPENV_ACTIVE_NAME";

/// Variable a module activation script sets to record the active module.
pub const ACTIVE_APP_VAR: &str = "CPENV_APP";
