//! Test fixtures shared by unit tests.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{create_temp_dir, RegistryBuilder};
//!
//! #[test]
//! fn my_test() {
//!     let registry = RegistryBuilder::new()
//!         .util("cn", &["clsx"])
//!         .component("button", &[], &["cn"])
//!         .build();
//!
//!     let temp = create_temp_dir();
//! }
//! ```

use tempfile::TempDir;

use crate::registry::{Registry, RegistryComponent, RegistryEntry, RegistryUtil};

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Builds in-memory registries without going through JSON.
///
/// Components default to `components/ui/<key>.tsx`, utilities to
/// `lib/<key>.ts`.
#[derive(Default)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn util(self, key: &str, packages: &[&str]) -> Self {
        self.util_entry(key, &[&format!("lib/{key}.ts")], packages)
    }

    pub fn util_with_files(self, key: &str, files: &[&str]) -> Self {
        self.util_entry(key, files, &[])
    }

    pub fn component(self, key: &str, registry_deps: &[&str], local_deps: &[&str]) -> Self {
        self.component_entry(
            key,
            &[&format!("components/ui/{key}.tsx")],
            registry_deps,
            local_deps,
            &[],
        )
    }

    pub fn component_with_files(
        self,
        key: &str,
        files: &[&str],
        registry_deps: &[&str],
        local_deps: &[&str],
    ) -> Self {
        self.component_entry(key, files, registry_deps, local_deps, &[])
    }

    pub fn component_with_packages(
        self,
        key: &str,
        registry_deps: &[&str],
        local_deps: &[&str],
        packages: &[&str],
    ) -> Self {
        self.component_entry(
            key,
            &[&format!("components/ui/{key}.tsx")],
            registry_deps,
            local_deps,
            packages,
        )
    }

    pub fn build(self) -> Registry {
        self.registry
    }

    fn util_entry(mut self, key: &str, files: &[&str], packages: &[&str]) -> Self {
        self.registry.utils.insert(
            key.to_string(),
            RegistryUtil {
                entry: entry(key, files, packages),
            },
        );
        self
    }

    fn component_entry(
        mut self,
        key: &str,
        files: &[&str],
        registry_deps: &[&str],
        local_deps: &[&str],
        packages: &[&str],
    ) -> Self {
        self.registry.components.insert(
            key.to_string(),
            RegistryComponent {
                entry: entry(key, files, packages),
                registry_dependencies: strings(registry_deps),
                local_dependencies: strings(local_deps),
                css_classes: Vec::new(),
            },
        );
        self
    }
}

fn entry(key: &str, files: &[&str], packages: &[&str]) -> RegistryEntry {
    RegistryEntry {
        description: format!("{key} description"),
        files: strings(files),
        packages: strings(packages),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
