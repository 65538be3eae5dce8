//! External package requirements of an install plan
//!
//! Aggregates the `packages` declared by every resolved item, drops the ones
//! the project already lists in `package.json`, and renders the install
//! command for the project's package manager.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::InstallPlan;

/// Union of all packages required by the plan, in first-seen order
pub fn collect_packages(plan: &InstallPlan<'_>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut packages = Vec::new();

    for item in plan {
        for package in &item.entry.packages {
            if seen.insert(package.as_str()) {
                packages.push(package.clone());
            }
        }
    }

    packages
}

/// The parts of `package.json` needed to tell what is already installed
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub dependencies: BTreeMap<String, serde_json::Value>,

    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, serde_json::Value>,
}

impl PackageManifest {
    /// Read `package.json` from the project root
    ///
    /// A missing or unparsable manifest is treated as an empty one.
    pub fn read(project_root: &Path) -> Self {
        let path = project_root.join("package.json");
        let Ok(content) = fs::read_to_string(&path) else {
            return Self::default();
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("ignoring unparsable {}: {e}", path.display());
            Self::default()
        })
    }

    pub fn has(&self, package: &str) -> bool {
        self.dependencies.contains_key(package) || self.dev_dependencies.contains_key(package)
    }
}

/// Packages the project does not list yet, order preserved
pub fn missing_packages(packages: &[String], manifest: &PackageManifest) -> Vec<String> {
    packages
        .iter()
        .filter(|p| !manifest.has(p))
        .cloned()
        .collect()
}

/// Package manager used to print the install hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    /// Detect from the lockfile present in the project root, defaulting to npm
    pub fn detect(project_root: &Path) -> Self {
        if project_root.join("pnpm-lock.yaml").exists() {
            PackageManager::Pnpm
        } else if project_root.join("yarn.lock").exists() {
            PackageManager::Yarn
        } else if project_root.join("bun.lockb").exists() || project_root.join("bun.lock").exists()
        {
            PackageManager::Bun
        } else {
            PackageManager::Npm
        }
    }

    pub fn install_command(self, packages: &[String]) -> String {
        let verb = match self {
            PackageManager::Npm => "npm install",
            PackageManager::Pnpm => "pnpm add",
            PackageManager::Yarn => "yarn add",
            PackageManager::Bun => "bun add",
        };
        format!("{verb} {}", packages.join(" "))
    }
}
