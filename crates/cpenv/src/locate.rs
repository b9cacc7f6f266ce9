// Copyright (c) Contributors to the cpenv project.
// SPDX-License-Identifier: Apache-2.0

//! Reference classification and match disambiguation.
//!
//! A user-supplied string is classified exactly once as a path or a name
//! before any lookup happens; the two query kinds never fall back to one
//! another. Lookup results pass through [`disambiguate`], which is total
//! over the match count: no match, a unique match, or an ambiguous set
//! that the caller must report instead of guessing.

use std::path::{Path, PathBuf};

use crate::environment::{AppModule, Environment};
use crate::registry::Registry;

#[cfg(test)]
#[path = "./locate_test.rs"]
mod locate_test;

/// A classified environment reference.
///
/// Classification is purely syntactic: anything containing a path
/// separator is a root-path query, everything else is a name query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvReference {
    /// Query against environment roots (exact or prefix match).
    Path(PathBuf),
    /// Query against environment names (exact match).
    Name(String),
}

impl EnvReference {
    /// Classify a raw user string.
    pub fn parse(input: &str) -> Self {
        if input.contains('/') || input.contains('\\') {
            Self::Path(PathBuf::from(input))
        } else {
            Self::Name(input.to_string())
        }
    }

    /// The environment name this reference implies: the name itself, or
    /// the final component of the path.
    pub fn implied_name(&self) -> crate::Result<String> {
        match self {
            Self::Name(name) => Ok(name.clone()),
            Self::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| crate::Error::InvalidReference(self.to_string())),
        }
    }
}

impl std::fmt::Display for EnvReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Name(name) => write!(f, "{name}"),
        }
    }
}

/// Outcome of resolving a reference against a set of candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    /// Nothing matched.
    None,
    /// Exactly one candidate matched.
    Unique(T),
    /// More than one candidate matched; candidates in lookup order.
    Ambiguous(Vec<T>),
}

/// Collapse a match set into a [`Resolution`]. Never picks among
/// multiple candidates.
pub fn disambiguate<T>(mut matches: Vec<T>) -> Resolution<T> {
    match matches.len() {
        0 => Resolution::None,
        1 => Resolution::Unique(matches.remove(0)),
        _ => Resolution::Ambiguous(matches),
    }
}

/// Query the registry for environments matching a classified reference.
///
/// Pure lookup; an empty result is a valid outcome, not a failure.
pub fn find_environments(
    registry: &dyn Registry,
    reference: &EnvReference,
) -> Vec<Environment> {
    match reference {
        EnvReference::Path(path) => registry.find_by_root(path),
        EnvReference::Name(name) => registry.find_by_name(name),
    }
}

/// Resolve a reference to a single environment, or report why not.
pub fn resolve_environment(
    registry: &dyn Registry,
    reference: &EnvReference,
) -> Resolution<Environment> {
    disambiguate(find_environments(registry, reference))
}

/// Resolve a module name within one environment's module set.
///
/// Module references are always name queries. Resolution stays total even
/// though module names are unique at insert time; a hand-edited registry
/// can still present duplicates, and those are reported, not guessed at.
pub fn resolve_module<'e>(env: &'e Environment, name: &str) -> Resolution<&'e AppModule> {
    disambiguate(env.modules().filter(|m| m.name == name).collect())
}

/// True if the environment root matches the queried path exactly or
/// lives underneath it.
pub(crate) fn root_matches(root: &Path, query: &Path) -> bool {
    root == query || root.starts_with(query)
}
