//! Common test utilities for sandbox-ui integration tests

// Each test binary uses a different subset
#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Catalog used by most tests
///
/// `navbar` depends on `button`; every component needs the `cn` utility.
pub const CATALOG: &str = r#"{
  "components": {
    "button": {
      "description": "Glass button with variants",
      "files": ["components/ui/button.tsx"],
      "localDependencies": ["cn"],
      "packages": []
    },
    "card": {
      "description": "Glass card container",
      "files": ["components/ui/card.tsx"],
      "localDependencies": ["cn"],
      "packages": []
    },
    "navbar": {
      "description": "Glass navigation bar",
      "files": ["components/ui/navbar.tsx"],
      "registryDependencies": ["button"],
      "localDependencies": ["cn"],
      "packages": []
    },
    "chart": {
      "description": "SVG line chart",
      "files": ["components/ui/chart.tsx"],
      "localDependencies": ["cn"],
      "packages": ["d3-shape"]
    }
  },
  "utils": {
    "cn": {
      "description": "Merge Tailwind class names",
      "files": ["lib/cn.ts"],
      "packages": ["clsx", "tailwind-merge"]
    }
  }
}"#;

pub const CN_SOURCE: &str = "import { clsx, type ClassValue } from \"clsx\";\nimport { twMerge } from \"tailwind-merge\";\n\nexport function cn(...inputs: ClassValue[]) {\n  return twMerge(clsx(inputs));\n}\n";

pub const BUTTON_SOURCE: &str = "import { cn } from \"@/lib/cn\";\n\nexport function Button() {\n  return <button className={cn(\"glass\")} />;\n}\n";

pub const NAVBAR_SOURCE: &str = "import { cn } from \"@/lib/cn\";\nimport { Button } from \"./button\";\n\nexport function Navbar() {\n  return <nav className={cn(\"glass\")}><Button /></nav>;\n}\n";

pub const BASE_CSS: &str = "/* ═══ sandbox-ui: Glass Design Tokens ═══ */\n:root {\n  --glass-bg: rgba(255, 255, 255, 0.03);\n}\n/* ═══ end sandbox-ui ═══ */\n";

/// A consumer project next to a registry on disk
///
/// ```text
/// <temp>/dist/registry.json
/// <temp>/dist/registry/...
/// <temp>/project/package.json
/// ```
pub struct TestProject {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to the project root
    pub path: PathBuf,
    /// Path to registry.json
    pub registry: PathBuf,
}

impl TestProject {
    /// Create a project with a package.json and the default registry
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("project");
        std::fs::create_dir_all(&path).expect("Failed to create project directory");

        let project = Self {
            registry: temp.path().join("dist").join("registry.json"),
            temp,
            path,
        };

        project.write_file("package.json", r#"{ "name": "app", "dependencies": {} }"#);
        project.write_registry(CATALOG);
        project.write_source("lib/cn.ts", CN_SOURCE);
        project.write_source("components/ui/button.tsx", BUTTON_SOURCE);
        project.write_source("components/ui/card.tsx", BUTTON_SOURCE.replace("Button", "Card").as_str());
        project.write_source("components/ui/navbar.tsx", NAVBAR_SOURCE);
        project.write_source(
            "components/ui/chart.tsx",
            "import { line } from \"d3-shape\";\nimport { cn } from \"@/lib/cn\";\n",
        );
        project.write_source("styles/base.css", BASE_CSS);
        project
    }

    /// Replace the catalog
    pub fn write_registry(&self, json: &str) {
        write(&self.registry, json);
    }

    /// Write a file into the registry's source directory
    pub fn write_source(&self, path: &str, content: &str) {
        let dir = self.registry.parent().expect("registry has a parent");
        write(&dir.join("registry").join(path), content);
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        write(&self.path.join(path), content);
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// The sandbox-ui binary, run from the project root against the test registry
    pub fn cmd(&self) -> Command {
        let mut cmd = sandbox_ui_cmd();
        cmd.current_dir(&self.path)
            .env("SANDBOX_UI_REGISTRY", &self.registry);
        cmd
    }

    /// Run `init --yes`, panicking on failure
    pub fn init(&self) {
        self.cmd().args(["init", "--yes"]).assert().success();
    }
}

fn write(path: &std::path::Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

/// The sandbox-ui binary with a clean environment
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn sandbox_ui_cmd() -> Command {
    let mut cmd = Command::cargo_bin("sandbox-ui").expect("binary is built");
    cmd.env_remove("SANDBOX_UI_REGISTRY")
        .env_remove("SANDBOX_UI_CWD")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}
