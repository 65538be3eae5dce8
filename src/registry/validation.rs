//! Whole-catalog validation
//!
//! The resolver tolerates dangling references and cycles (it drops the former
//! and truncates the latter). This pass finds those authoring mistakes up
//! front, together with entries that would install nothing and entries whose
//! files would land on the same destination.
//!
//! In [`ValidationMode::Strict`] any problem is an error; in
//! [`ValidationMode::Lenient`] the problems are handed back as warnings and the
//! command carries on.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use super::{ItemKind, Registry};
use crate::error::{Result, SandboxError};

/// How validation problems are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Fail the command on any problem
    Strict,
    /// Report problems as warnings and continue
    #[default]
    Lenient,
}

/// A single authoring mistake in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// A dependency names an entry that does not exist
    Dangling {
        from: String,
        kind: ItemKind,
        missing: String,
    },
    /// Components that (transitively) depend on themselves
    Cycle { chain: Vec<String> },
    /// An entry with no files
    NoFiles { kind: ItemKind, key: String },
    /// Two entries write the same file name into the same directory
    BasenameCollision {
        kind: ItemKind,
        basename: String,
        keys: Vec<String>,
    },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Dangling {
                from,
                kind,
                missing,
            } => write!(
                f,
                "component '{from}' depends on {kind} '{missing}' which is not in the registry"
            ),
            Problem::Cycle { chain } => {
                write!(f, "circular dependency: {}", chain.join(" -> "))
            }
            Problem::NoFiles { kind, key } => write!(f, "{kind} '{key}' lists no files"),
            Problem::BasenameCollision {
                kind,
                basename,
                keys,
            } => write!(
                f,
                "{kind} entries {} all install '{basename}' into the same directory",
                keys.iter()
                    .map(|k| format!("'{k}'"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

/// Result of a validation pass
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub problems: Vec<Problem>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    /// Apply the mode
    ///
    /// Strict mode turns any problem into `RegistryValidation`; lenient mode
    /// returns the problems for the caller to print as warnings.
    pub fn enforce(self, mode: ValidationMode) -> Result<Vec<Problem>> {
        if self.problems.is_empty() {
            return Ok(Vec::new());
        }

        match mode {
            ValidationMode::Strict => Err(SandboxError::RegistryValidation {
                problems: self.problems.iter().map(ToString::to_string).collect(),
            }),
            ValidationMode::Lenient => {
                for problem in &self.problems {
                    tracing::warn!("registry: {problem}");
                }
                Ok(self.problems)
            }
        }
    }
}

/// Check the whole catalog
///
/// Problems are reported in catalog order so the output is stable.
pub fn validate(registry: &Registry) -> ValidationReport {
    let mut problems = Vec::new();

    check_dangling(registry, &mut problems);
    check_cycles(registry, &mut problems);
    check_files(registry, &mut problems);

    ValidationReport { problems }
}

fn check_dangling(registry: &Registry, problems: &mut Vec<Problem>) {
    for (key, component) in &registry.components {
        for dep in &component.registry_dependencies {
            if registry.component(dep).is_none() {
                problems.push(Problem::Dangling {
                    from: key.clone(),
                    kind: ItemKind::Component,
                    missing: dep.clone(),
                });
            }
        }
        for dep in &component.local_dependencies {
            if registry.util(dep).is_none() {
                problems.push(Problem::Dangling {
                    from: key.clone(),
                    kind: ItemKind::Util,
                    missing: dep.clone(),
                });
            }
        }
    }
}

/// DFS state for cycle detection
struct CycleSearch<'a> {
    registry: &'a Registry,
    /// Fully explored (BLACK)
    done: HashSet<&'a str>,
    /// Current path (GRAY), in visiting order
    stack: Vec<&'a str>,
    cycles: Vec<Vec<String>>,
}

impl<'a> CycleSearch<'a> {
    fn visit(&mut self, key: &'a str) {
        if let Some(pos) = self.stack.iter().position(|k| *k == key) {
            let mut chain: Vec<String> =
                self.stack[pos..].iter().map(ToString::to_string).collect();
            chain.push(key.to_string());
            self.cycles.push(chain);
            return;
        }
        if self.done.contains(key) {
            return;
        }
        let registry = self.registry;
        let Some(component) = registry.component(key) else {
            return;
        };

        self.stack.push(key);
        for dep in &component.registry_dependencies {
            self.visit(dep);
        }
        self.stack.pop();
        self.done.insert(key);
    }
}

fn check_cycles(registry: &Registry, problems: &mut Vec<Problem>) {
    let mut search = CycleSearch {
        registry,
        done: HashSet::new(),
        stack: Vec::new(),
        cycles: Vec::new(),
    };

    for key in registry.components.keys() {
        search.visit(key);
    }

    problems.extend(
        search
            .cycles
            .into_iter()
            .map(|chain| Problem::Cycle { chain }),
    );
}

fn check_files(registry: &Registry, problems: &mut Vec<Problem>) {
    let components = registry
        .components
        .iter()
        .map(|(key, c)| (key.as_str(), c.entry.files.as_slice()));
    let utils = registry
        .utils
        .iter()
        .map(|(key, u)| (key.as_str(), u.entry.files.as_slice()));

    check_group(ItemKind::Component, components, problems);
    check_group(ItemKind::Util, utils, problems);
}

/// Empty file lists and destination collisions within one destination directory
fn check_group<'a>(
    kind: ItemKind,
    entries: impl Iterator<Item = (&'a str, &'a [String])>,
    problems: &mut Vec<Problem>,
) {
    let mut owners: HashMap<String, Vec<String>> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for (key, files) in entries {
        if files.is_empty() {
            problems.push(Problem::NoFiles {
                kind,
                key: key.to_string(),
            });
        }
        for file in files {
            let file_name = basename(file);
            let keys = owners.entry(file_name.clone()).or_default();
            if keys.is_empty() {
                order.push(file_name);
            }
            if !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
    }

    for file_name in order {
        if let Some(keys) = owners.remove(&file_name) {
            if keys.len() > 1 {
                problems.push(Problem::BasenameCollision {
                    kind,
                    basename: file_name,
                    keys,
                });
            }
        }
    }
}

pub(crate) fn basename(file: &str) -> String {
    Path::new(file)
        .file_name()
        .map_or_else(|| file.to_string(), |n| n.to_string_lossy().into_owned())
}
