//! Project configuration (components.json)
//!
//! `init` writes this file; `add` only reads it. It records where components
//! and utilities land in the consumer's project and which stylesheet holds the
//! base glass styles:
//!
//! ```json
//! {
//!   "style": "glass",
//!   "tailwind": { "css": "app/globals.css" },
//!   "aliases": { "components": "@/components/ui", "utils": "@/lib" }
//! }
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SandboxError};

/// Config filename, stored in the project root
pub const CONFIG_FILE: &str = "components.json";

/// Default alias for installed components
pub const DEFAULT_COMPONENTS_ALIAS: &str = "@/components/ui";

/// Default alias for installed utilities
pub const DEFAULT_UTILS_ALIAS: &str = "@/lib";

/// Default global stylesheet
pub const DEFAULT_CSS_PATH: &str = "app/globals.css";

/// Default `style` value
pub const DEFAULT_STYLE: &str = "glass";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailwindConfig {
    pub css: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aliases {
    pub components: String,
    pub utils: String,
}

/// Contents of components.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_style")]
    pub style: String,
    pub tailwind: TailwindConfig,
    pub aliases: Aliases,
}

fn default_style() -> String {
    DEFAULT_STYLE.to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self::new(DEFAULT_COMPONENTS_ALIAS, DEFAULT_UTILS_ALIAS, DEFAULT_CSS_PATH)
    }
}

impl ProjectConfig {
    pub fn new(components_alias: &str, utils_alias: &str, css_path: &str) -> Self {
        Self {
            style: default_style(),
            tailwind: TailwindConfig {
                css: css_path.to_string(),
            },
            aliases: Aliases {
                components: trim_alias(components_alias),
                utils: trim_alias(utils_alias),
            },
        }
    }

    pub fn components_alias(&self) -> &str {
        &self.aliases.components
    }

    pub fn utils_alias(&self) -> &str {
        &self.aliases.utils
    }

    pub fn css_path(&self) -> &str {
        &self.tailwind.css
    }

    /// Parse from JSON, reporting `path` on failure
    ///
    /// Hand-edited aliases are normalized the same way as those given to `new`.
    pub fn from_json(json: &str, path: &Path) -> Result<Self> {
        let mut config: Self =
            serde_json::from_str(json).map_err(|e| SandboxError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        config.aliases.components = trim_alias(&config.aliases.components);
        config.aliases.utils = trim_alias(&config.aliases.utils);
        Ok(config)
    }

    /// Pretty JSON with a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| SandboxError::IoError {
            message: format!("Failed to serialize {CONFIG_FILE}: {e}"),
        })?;
        Ok(format!("{json}\n"))
    }
}

/// Aliases are stored without a trailing slash
fn trim_alias(alias: &str) -> String {
    let trimmed = alias.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        alias.trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Find the project root by walking up to the first directory with a package.json
///
/// Falls back to `start` when no ancestor has one.
pub fn find_project_root(start: &Path) -> PathBuf {
    let start = dunce::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());

    let mut current = start.as_path();
    loop {
        if current.join("package.json").is_file() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return start,
        }
    }
}

/// Map an alias to a filesystem path
///
/// `@/` maps to the project root; other relative aliases are taken relative to
/// the project root and absolute ones are kept as is.
pub fn resolve_alias(project_root: &Path, alias: &str) -> PathBuf {
    if let Some(rest) = alias.strip_prefix("@/") {
        return project_root.join(rest);
    }
    if alias == "@" {
        return project_root.to_path_buf();
    }
    project_root.join(alias)
}

pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE)
}

/// Read components.json, `None` if the project has not been initialized
pub fn read_config(project_root: &Path) -> Result<Option<ProjectConfig>> {
    let path = config_path(project_root);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|e| SandboxError::ConfigReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    ProjectConfig::from_json(&content, &path).map(Some)
}

/// Read components.json, failing with `MissingConfig` if it is absent
pub fn require_config(project_root: &Path) -> Result<ProjectConfig> {
    read_config(project_root)?.ok_or_else(|| SandboxError::MissingConfig {
        path: project_root.display().to_string(),
    })
}

/// Write components.json
///
/// Goes through a temp file in the same directory and a rename so an
/// interrupted write never leaves a truncated config behind.
pub fn write_config(project_root: &Path, config: &ProjectConfig) -> Result<PathBuf> {
    let path = config_path(project_root);
    let content = config.to_json()?;
    let write_error = |e: std::io::Error| SandboxError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(project_root).map_err(write_error)?;
    tmp.write_all(content.as_bytes()).map_err(write_error)?;
    tmp.persist(&path).map_err(|e| write_error(e.error))?;

    tracing::debug!("wrote {}", path.display());
    Ok(path)
}
