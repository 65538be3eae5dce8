//! Component registry (registry.json) loading and lookup
//!
//! The registry is the static catalog of installable components and shared
//! utilities. It is loaded once per command and handed to the resolver and the
//! planner as an explicit value; nothing here caches it process-wide.
//!
//! ## Layout on disk
//!
//! ```text
//! registry.json            <- catalog (JSON, or registry.yaml for YAML)
//! registry/
//!   components/ui/button.tsx
//!   lib/cn.ts
//!   styles/base.css        <- stylesheet injected by `init`
//! ```
//!
//! Every `files` entry in the catalog is relative to the `registry/` directory
//! that sits next to the catalog file.

pub mod validation;

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SandboxError};

/// Default catalog filename
pub const REGISTRY_FILE: &str = "registry.json";

/// Directory holding the source files, relative to the catalog's directory
pub const SOURCE_DIR: &str = "registry";

/// Which half of the catalog an entry lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemKind {
    Component,
    Util,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Component => write!(f, "component"),
            ItemKind::Util => write!(f, "utility"),
        }
    }
}

/// Fields shared by components and utilities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Human-readable description, display only
    pub description: String,

    /// Source files relative to the registry source directory
    pub files: Vec<String>,

    /// External packages the entry's code imports at runtime
    #[serde(default)]
    pub packages: Vec<String>,
}

/// An installable component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryComponent {
    #[serde(flatten)]
    pub entry: RegistryEntry,

    /// Other components this component imports from
    #[serde(default)]
    pub registry_dependencies: Vec<String>,

    /// Utilities this component imports from
    #[serde(default)]
    pub local_dependencies: Vec<String>,

    /// CSS classes the component relies on (informational)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub css_classes: Vec<String>,
}

/// A shared utility; utilities never depend on anything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryUtil {
    #[serde(flatten)]
    pub entry: RegistryEntry,
}

/// The loaded catalog
///
/// Both maps keep the catalog's insertion order so listings and error messages
/// are stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub components: IndexMap<String, RegistryComponent>,

    #[serde(default)]
    pub utils: IndexMap<String, RegistryUtil>,

    #[serde(skip)]
    source_root: PathBuf,
}

impl Registry {
    /// Load a catalog from disk
    ///
    /// `.yaml`/`.yml` files are parsed as YAML, everything else as JSON. The
    /// source root is set to the `registry/` directory next to the file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| SandboxError::RegistryLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let parsed = if is_yaml {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        };

        let registry = parsed.map_err(|e| match e {
            SandboxError::RegistryLoad { reason, .. } => SandboxError::RegistryLoad {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        tracing::debug!(
            components = registry.components.len(),
            utils = registry.utils.len(),
            "loaded registry from {}",
            path.display()
        );
        Ok(registry.with_source_root(base.join(SOURCE_DIR)))
    }

    /// Parse a catalog from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SandboxError::RegistryLoad {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })
    }

    /// Parse a catalog from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| SandboxError::RegistryLoad {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })
    }

    /// Set the directory that entry `files` are relative to
    #[must_use]
    pub fn with_source_root(mut self, root: PathBuf) -> Self {
        self.source_root = root;
        self
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn component(&self, key: &str) -> Option<&RegistryComponent> {
        self.components.get(key)
    }

    pub fn util(&self, key: &str) -> Option<&RegistryUtil> {
        self.utils.get(key)
    }

    /// Component keys in catalog order
    pub fn component_keys(&self) -> Vec<&str> {
        self.components.keys().map(String::as_str).collect()
    }

    /// Fail with `UnknownComponent` if any requested key is not a component
    ///
    /// Every unknown name is reported at once, in request order, without
    /// duplicates.
    pub fn ensure_known(&self, requested: &[String]) -> Result<()> {
        let mut unknown: Vec<String> = Vec::new();
        for name in requested {
            if !self.components.contains_key(name) && !unknown.contains(name) {
                unknown.push(name.clone());
            }
        }

        if unknown.is_empty() {
            return Ok(());
        }

        Err(SandboxError::UnknownComponent {
            unknown,
            available: self
                .component_keys()
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
    }
}

/// Locate the catalog file
///
/// An explicit path (from `--registry` or `SANDBOX_UI_REGISTRY`) wins;
/// otherwise `registry.json` next to the running executable is used.
pub fn locate(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    let exe = std::env::current_exe().map_err(|e| SandboxError::RegistryLoad {
        path: REGISTRY_FILE.to_string(),
        reason: format!("cannot locate executable: {e}"),
    })?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(REGISTRY_FILE))
}
