//! Installation planning
//!
//! Maps every file of every resolved item to its destination under the
//! project's aliases and prepares the content to write. Nothing is written
//! here: file content and destination existence come from a [`PlanSources`]
//! implementation, so the same plan can be built against disk or against
//! in-memory fixtures.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::{ProjectConfig, resolve_alias};
use crate::error::{Result, SandboxError};
use crate::registry::ItemKind;
use crate::registry::validation::basename;
use crate::resolver::InstallPlan;

use super::rewrite::rewrite_imports;

/// Access to registry sources and to the destination tree
pub trait PlanSources {
    /// Read a registry source file, `None` if it does not exist
    fn read_source(&self, path: &Path) -> Result<Option<String>>;

    /// Whether a destination file already exists
    fn destination_exists(&self, path: &Path) -> bool;
}

/// Reads sources and checks destinations on the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskSources;

impl PlanSources for DiskSources {
    fn read_source(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SandboxError::FileReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn destination_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Content queued for a destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Component source with imports rewritten to the project aliases
    Rewritten(String),
    /// Utility source, copied as is
    Raw(String),
}

impl FileContent {
    pub fn as_str(&self) -> &str {
        match self {
            FileContent::Rewritten(text) | FileContent::Raw(text) => text,
        }
    }
}

/// One planned file write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWrite {
    pub kind: ItemKind,
    pub item: String,
    pub source_path: PathBuf,
    /// Destination as an alias path, e.g. `@/components/ui/button.tsx`
    pub dest_alias: String,
    pub dest_path: PathBuf,
    pub content: FileContent,
    pub destination_exists: bool,
}

/// Where files come from and where they go
#[derive(Debug, Clone, Copy)]
pub struct PlanTarget<'a> {
    pub config: &'a ProjectConfig,
    pub project_root: &'a Path,
    pub source_root: &'a Path,
}

/// Planned writes plus the files that could not be planned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallWrites {
    pub writes: Vec<FileWrite>,
    /// Registry files that do not exist in the source tree
    pub missing: Vec<String>,
    /// Destinations already claimed by an earlier item
    pub collisions: Vec<String>,
}

/// Build the list of file writes for a resolved plan
///
/// Writes follow the plan's order, so dependencies are written first. When two
/// items share a destination the earlier one wins and the later file is
/// reported in `collisions`.
pub fn plan_install(
    plan: &InstallPlan<'_>,
    target: &PlanTarget<'_>,
    sources: &impl PlanSources,
) -> Result<InstallWrites> {
    let mut result = InstallWrites::default();
    let mut claimed: HashSet<PathBuf> = HashSet::new();
    let components_alias = target.config.components_alias();
    let utils_alias = target.config.utils_alias();

    for item in plan {
        let alias = match item.kind {
            ItemKind::Component => components_alias,
            ItemKind::Util => utils_alias,
        };

        for file in &item.entry.files {
            let dest_alias = format!("{alias}/{}", basename(file));
            let dest_path = resolve_alias(target.project_root, &dest_alias);

            if claimed.contains(&dest_path) {
                tracing::warn!("{} '{}' would overwrite {dest_alias}", item.kind, item.key);
                result.collisions.push(file.clone());
                continue;
            }

            let source_path = target.source_root.join(file);
            let Some(source) = sources.read_source(&source_path)? else {
                tracing::warn!("source file not found: {}", source_path.display());
                result.missing.push(file.clone());
                continue;
            };
            // Only files that will actually be written claim their destination
            claimed.insert(dest_path.clone());

            let content = match item.kind {
                ItemKind::Component => {
                    FileContent::Rewritten(rewrite_imports(&source, components_alias, utils_alias))
                }
                ItemKind::Util => FileContent::Raw(source),
            };

            result.writes.push(FileWrite {
                kind: item.kind,
                item: item.key.to_string(),
                destination_exists: sources.destination_exists(&dest_path),
                source_path,
                dest_alias,
                dest_path,
                content,
            });
        }
    }

    Ok(result)
}
