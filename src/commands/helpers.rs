//! Helpers shared by the commands

use std::path::{Path, PathBuf};

use crate::config::find_project_root;
use crate::error::{Result, SandboxError};
use crate::registry::validation::{ValidationMode, validate};
use crate::registry::{self, Registry};
use crate::ui::logger;

/// Project root for `--cwd`, or for the current directory
pub fn project_root(cwd: Option<PathBuf>) -> Result<PathBuf> {
    let start = match cwd {
        Some(path) => path,
        None => std::env::current_dir().map_err(|e| SandboxError::IoError {
            message: format!("Failed to get current directory: {e}"),
        })?,
    };
    let root = find_project_root(&start);
    tracing::debug!("project root: {}", root.display());
    Ok(root)
}

/// Locate, load and validate the registry
///
/// In lenient mode every validation problem is printed as a warning.
pub fn load_registry(explicit: Option<PathBuf>, mode: ValidationMode) -> Result<Registry> {
    let path = registry::locate(explicit)?;
    let registry = Registry::load(&path)?;

    let report = validate(&registry);
    if report.is_clean() {
        tracing::debug!("registry passed validation");
    }
    let problems = report.enforce(mode)?;
    for problem in &problems {
        logger::warn(&format!("Registry: {problem}"));
    }

    Ok(registry)
}

/// `path` relative to the project root, for display
pub fn relative(project_root: &Path, path: &Path) -> String {
    crate::installer::display_path(project_root, path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_fixtures::create_temp_dir;
    use std::fs;

    fn write_registry(dir: &Path, json: &str) -> PathBuf {
        let path = dir.join("registry.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_project_root_walks_up() {
        let temp = create_temp_dir();
        fs::write(temp.path().join("package.json"), "{}").unwrap();
        let nested = temp.path().join("src/app");
        fs::create_dir_all(&nested).unwrap();

        let root = project_root(Some(nested)).unwrap();

        assert_eq!(root, dunce::canonicalize(temp.path()).unwrap());
    }

    #[test]
    fn test_load_registry_lenient_accepts_dangling() {
        let temp = create_temp_dir();
        let path = write_registry(
            temp.path(),
            r#"{"components": {"navbar": {"description": "Nav", "files": ["components/ui/navbar.tsx"], "registryDependencies": ["ghost"]}}}"#,
        );

        let registry = load_registry(Some(path), ValidationMode::Lenient).unwrap();

        assert!(registry.component("navbar").is_some());
        assert_eq!(registry.source_root(), temp.path().join("registry"));
    }

    #[test]
    fn test_load_registry_strict_rejects_dangling() {
        let temp = create_temp_dir();
        let path = write_registry(
            temp.path(),
            r#"{"components": {"navbar": {"description": "Nav", "files": ["components/ui/navbar.tsx"], "registryDependencies": ["ghost"]}}}"#,
        );

        let err = load_registry(Some(path), ValidationMode::Strict).unwrap_err();

        assert!(matches!(err, SandboxError::RegistryValidation { .. }));
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_load_registry_missing_file() {
        let temp = create_temp_dir();
        let err = load_registry(
            Some(temp.path().join("nope.json")),
            ValidationMode::Lenient,
        )
        .unwrap_err();
        assert!(matches!(err, SandboxError::RegistryLoad { .. }));
    }
}
