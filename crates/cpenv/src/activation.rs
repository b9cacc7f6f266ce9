// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

//! Activation script emission and shell rendering.
//!
//! The emitter decides which abstract statements an activation needs and
//! in what order; statement syntax belongs to [`Shell::render`] alone.
//! Deactivation is the exact inverse of activation in reverse order, so
//! [`ShellOp::inverse`] is a bijection: `Unset` and `Remove` carry the
//! value they undo.

use crate::environment::{AppModule, Environment};
use crate::{ACTIVE_APP_VAR, ACTIVE_NAME_VAR, ACTIVE_ROOT_VAR};

#[cfg(test)]
#[path = "./activation_test.rs"]
mod activation_test;

/// One abstract shell statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOp {
    /// Non-executing annotation line.
    Comment { comment: String },

    /// Set a variable to a value.
    Set { var: String, value: String },

    /// Unset a variable that was set to `value`.
    Unset { var: String, value: String },

    /// Prepend an entry to a list-valued variable.
    Prepend { var: String, value: String },

    /// Remove a previously prepended entry from a list-valued variable.
    Remove { var: String, value: String },
}

impl ShellOp {
    /// The statement that exactly undoes this one.
    pub fn inverse(&self) -> ShellOp {
        match self {
            Self::Comment { comment } => Self::Comment {
                comment: comment.clone(),
            },
            Self::Set { var, value } => Self::Unset {
                var: var.clone(),
                value: value.clone(),
            },
            Self::Unset { var, value } => Self::Set {
                var: var.clone(),
                value: value.clone(),
            },
            Self::Prepend { var, value } => Self::Remove {
                var: var.clone(),
                value: value.clone(),
            },
            Self::Remove { var, value } => Self::Prepend {
                var: var.clone(),
                value: value.clone(),
            },
        }
    }
}

/// An ordered, transient sequence of shell statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationScript {
    ops: Vec<ShellOp>,
}

impl ActivationScript {
    pub fn new(ops: Vec<ShellOp>) -> Self {
        Self { ops }
    }

    pub fn ops(&self) -> &[ShellOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The exact inverse script: every statement inverted, in reverse
    /// order. Reversing twice restores the original.
    pub fn reversed(&self) -> ActivationScript {
        Self {
            ops: self.ops.iter().rev().map(ShellOp::inverse).collect(),
        }
    }
}

/// Statements that make `env` the active environment once sourced.
pub fn environment_activation(env: &Environment) -> ActivationScript {
    let root = env.root.display().to_string();
    let bin = env.root.join("bin").display().to_string();

    ActivationScript::new(vec![
        ShellOp::Comment {
            comment: format!("cpenv environment: {} ({})", env.name, root),
        },
        ShellOp::Set {
            var: ACTIVE_ROOT_VAR.to_string(),
            value: root,
        },
        ShellOp::Set {
            var: ACTIVE_NAME_VAR.to_string(),
            value: env.name.clone(),
        },
        ShellOp::Prepend {
            var: "PATH".to_string(),
            value: bin,
        },
    ])
}

/// Statements that fully reverse [`environment_activation`].
pub fn environment_deactivation(env: &Environment) -> ActivationScript {
    environment_activation(env).reversed()
}

/// Statements that bring a module's launch context into the shell.
pub fn module_activation(module: &AppModule) -> ActivationScript {
    let bin = module.repo.join("bin").display().to_string();

    ActivationScript::new(vec![
        ShellOp::Comment {
            comment: format!("cpenv module: {} ({})", module.name, module.command),
        },
        ShellOp::Set {
            var: ACTIVE_APP_VAR.to_string(),
            value: module.name.clone(),
        },
        ShellOp::Prepend {
            var: "PATH".to_string(),
            value: bin,
        },
    ])
}

/// Shell dialect for script rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

impl Shell {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "bash" => Some(Shell::Bash),
            "zsh" => Some(Shell::Zsh),
            "fish" => Some(Shell::Fish),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
            Shell::Fish => "fish",
        }
    }

    /// Render the script's statements in this dialect, one per line.
    pub fn render(self, script: &ActivationScript) -> String {
        let mut lines = Vec::with_capacity(script.ops().len());
        for op in script.ops() {
            lines.push(match self {
                Shell::Bash | Shell::Zsh => render_posix(op),
                Shell::Fish => render_fish(op),
            });
        }
        let mut out = lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

fn render_posix(op: &ShellOp) -> String {
    match op {
        ShellOp::Comment { comment } => format!("# {comment}"),
        ShellOp::Set { var, value } => format!("export {var}=\"{}\"", posix_quote(value)),
        ShellOp::Unset { var, .. } => format!("unset {var}"),
        ShellOp::Prepend { var, value } => format!(
            "export {var}=\"{}${{{var}:+:${var}}}\"",
            posix_quote(value)
        ),
        ShellOp::Remove { var, value } => {
            let quoted = posix_quote(value);
            format!(
                "if [ \"${var}\" = \"{quoted}\" ]; then unset {var}; else export {var}=\"${{{var}#\"{quoted}\":}}\"; fi"
            )
        }
    }
}

fn render_fish(op: &ShellOp) -> String {
    match op {
        ShellOp::Comment { comment } => format!("# {comment}"),
        ShellOp::Set { var, value } => format!("set -gx {var} \"{}\"", fish_quote(value)),
        ShellOp::Unset { var, .. } => format!("set -e {var}"),
        ShellOp::Prepend { var, value } => {
            format!("set -gx {var} \"{}\" ${var}", fish_quote(value))
        }
        ShellOp::Remove { var, value } => format!(
            "if set -l __cpenv_i (contains -i -- \"{}\" ${var}); set -e {var}[$__cpenv_i]; end",
            fish_quote(value)
        ),
    }
}

fn posix_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn fish_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '"' | '$') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
