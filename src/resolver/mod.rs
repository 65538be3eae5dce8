//! Dependency resolution for registry components
//!
//! Turns a list of requested component keys into an [`InstallPlan`]: every
//! component and utility that has to be installed, each exactly once, with
//! dependencies ahead of their dependents.
//!
//! ## Algorithm
//!
//! Post-order DFS over the registry with a visited set keyed by
//! `(kind, key)`:
//!
//! 1. A component is marked visited *before* its dependencies are walked, so
//!    a cycle is cut the second time a component is reached instead of
//!    recursing forever. The walk stays partial along the back-edge; strict
//!    validation is what reports the cycle.
//! 2. Its `registryDependencies` are walked in listed order, then its
//!    `localDependencies` (utilities, separate namespace).
//! 3. The component is appended after all of its dependencies.
//!
//! Utilities are appended on first visit. Keys that are not in the registry
//! are skipped silently.
//!
//! ```text
//! navbar -> [button, cn]      button -> [cn]
//!
//! resolve(["navbar"]) = [cn (utility), button, navbar]
//! ```

pub mod packages;

use std::collections::HashSet;

use crate::registry::{ItemKind, Registry, RegistryEntry};

/// One component or utility that needs installing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedItem<'r> {
    pub kind: ItemKind,
    pub key: &'r str,
    pub entry: &'r RegistryEntry,
}

impl ResolvedItem<'_> {
    /// Display label, utilities are suffixed with `(utility)`
    pub fn label(&self) -> String {
        match self.kind {
            ItemKind::Component => self.key.to_string(),
            ItemKind::Util => format!("{} (utility)", self.key),
        }
    }
}

/// Ordered, duplicate-free list of items to install
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallPlan<'r> {
    items: Vec<ResolvedItem<'r>>,
}

impl<'r> InstallPlan<'r> {
    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedItem<'r>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of source files across all items
    pub fn file_count(&self) -> usize {
        self.items.iter().map(|item| item.entry.files.len()).sum()
    }

    /// Index of an item in installation order
    #[cfg(test)]
    pub fn position(&self, kind: ItemKind, key: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.kind == kind && item.key == key)
    }
}

impl<'a, 'r> IntoIterator for &'a InstallPlan<'r> {
    type Item = &'a ResolvedItem<'r>;
    type IntoIter = std::slice::Iter<'a, ResolvedItem<'r>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Traversal state
struct ResolveContext<'r> {
    registry: &'r Registry,
    /// Entries already planned or in progress
    visited: HashSet<(ItemKind, &'r str)>,
    /// Plan in dependency order
    items: Vec<ResolvedItem<'r>>,
}

impl<'r> ResolveContext<'r> {
    fn visit_component(&mut self, name: &str) {
        let registry = self.registry;
        let Some((key, component)) = registry.components.get_key_value(name) else {
            tracing::debug!("skipping unknown component dependency '{name}'");
            return;
        };
        if !self.visited.insert((ItemKind::Component, key.as_str())) {
            return;
        }

        for dep in &component.registry_dependencies {
            self.visit_component(dep);
        }
        for dep in &component.local_dependencies {
            self.visit_util(dep);
        }

        self.items.push(ResolvedItem {
            kind: ItemKind::Component,
            key: key.as_str(),
            entry: &component.entry,
        });
    }

    fn visit_util(&mut self, name: &str) {
        let registry = self.registry;
        let Some((key, util)) = registry.utils.get_key_value(name) else {
            tracing::debug!("skipping unknown utility dependency '{name}'");
            return;
        };
        if !self.visited.insert((ItemKind::Util, key.as_str())) {
            return;
        }

        self.items.push(ResolvedItem {
            kind: ItemKind::Util,
            key: key.as_str(),
            entry: &util.entry,
        });
    }
}

/// Resolve requested components into an installation plan
///
/// Requested keys are processed in the order given; the output is fully
/// determined by that order and the registry's listed dependency order.
///
/// # Example
///
/// ```text
/// Registry:
///   navbar (depends on: button; uses: cn)
///   button (uses: cn)
///
/// resolve(["button", "navbar"]) = [cn, button, navbar]
/// ```
pub fn resolve<'r, S: AsRef<str>>(requested: &[S], registry: &'r Registry) -> InstallPlan<'r> {
    let mut ctx = ResolveContext {
        registry,
        visited: HashSet::new(),
        items: Vec::new(),
    };

    for name in requested {
        ctx.visit_component(name.as_ref());
    }

    tracing::debug!(
        requested = requested.len(),
        resolved = ctx.items.len(),
        "resolved install plan"
    );

    InstallPlan { items: ctx.items }
}
