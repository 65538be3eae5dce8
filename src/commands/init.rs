//! Init command implementation
//!
//! Sets a project up for `add`:
//! 1. writes components.json
//! 2. installs the `cn` class-name helper into the utils directory
//! 3. injects the base glass stylesheet into the global CSS file

use std::fs;
use std::path::{Path, PathBuf};

use inquire::{Confirm, Text};

use crate::cli::InitArgs;
use crate::commands::helpers::{self, relative};
use crate::config::{
    CONFIG_FILE, DEFAULT_COMPONENTS_ALIAS, DEFAULT_CSS_PATH, DEFAULT_UTILS_ALIAS, ProjectConfig,
    read_config, resolve_alias, write_config,
};
use crate::error::{Result, SandboxError};
use crate::installer::materialize::write_file;
use crate::registry::Registry;
use crate::registry::validation::ValidationMode;
use crate::resolver::packages::{PackageManager, PackageManifest, missing_packages};
use crate::ui::logger;

/// First line of the injected stylesheet; its presence means "already injected"
pub const CSS_MARKER: &str = "/* ═══ sandbox-ui: Glass Design Tokens";

/// Stylesheet location inside the registry source directory
pub const BASE_CSS_FILE: &str = "styles/base.css";

/// Key of the class-name helper in the registry's utilities
const CN_UTIL: &str = "cn";

/// Packages the `cn` helper imports
const CN_PACKAGES: [&str; 2] = ["clsx", "tailwind-merge"];

const CN_FALLBACK_TS: &str = r#"import { clsx, type ClassValue } from "clsx";
import { twMerge } from "tailwind-merge";

export function cn(...inputs: ClassValue[]) {
  return twMerge(clsx(inputs));
}
"#;

const CN_FALLBACK_JS: &str = r#"import { clsx } from "clsx";
import { twMerge } from "tailwind-merge";

export function cn(...inputs) {
  return twMerge(clsx(inputs));
}
"#;

/// Answers collected from flags and prompts
#[derive(Debug, Clone, PartialEq, Eq)]
struct InitAnswers {
    components_alias: String,
    utils_alias: String,
    css_path: String,
    typescript: bool,
}

impl InitAnswers {
    /// Defaults, overridden by whatever was passed on the command line
    fn from_flags(args: &InitArgs) -> Self {
        Self {
            components_alias: args
                .components
                .clone()
                .unwrap_or_else(|| DEFAULT_COMPONENTS_ALIAS.to_string()),
            utils_alias: args
                .utils
                .clone()
                .unwrap_or_else(|| DEFAULT_UTILS_ALIAS.to_string()),
            css_path: args
                .css
                .clone()
                .unwrap_or_else(|| DEFAULT_CSS_PATH.to_string()),
            typescript: !args.js,
        }
    }

    /// Ask for every value not given as a flag
    fn prompt(args: &InitArgs) -> Result<Self> {
        let mut answers = Self::from_flags(args);

        if args.components.is_none() {
            answers.components_alias = Text::new("Where should components be installed?")
                .with_default(DEFAULT_COMPONENTS_ALIAS)
                .prompt()?;
        }
        if args.utils.is_none() {
            answers.utils_alias = Text::new("Where should utilities (cn, etc.) be installed?")
                .with_default(DEFAULT_UTILS_ALIAS)
                .prompt()?;
        }
        if args.css.is_none() {
            answers.css_path = Text::new("Path to your global CSS file?")
                .with_default(DEFAULT_CSS_PATH)
                .prompt()?;
        }
        if !args.js {
            answers.typescript = Confirm::new("Are you using TypeScript?")
                .with_default(true)
                .prompt()?;
        }

        Ok(answers)
    }

    fn config(&self) -> ProjectConfig {
        ProjectConfig::new(&self.components_alias, &self.utils_alias, &self.css_path)
    }
}

/// Run init command
pub fn run(cwd: Option<PathBuf>, registry: Option<PathBuf>, args: InitArgs) -> Result<()> {
    logger::title("sandbox-ui init");

    let root = helpers::project_root(cwd)?;

    if read_config(&root)?.is_some() && !args.yes {
        let overwrite = Confirm::new(&format!("{CONFIG_FILE} already exists. Overwrite?"))
            .with_default(false)
            .prompt()?;
        if !overwrite {
            logger::info("Init cancelled.");
            return Ok(());
        }
    }

    let answers = if args.yes {
        InitAnswers::from_flags(&args)
    } else {
        InitAnswers::prompt(&args)?
    };
    tracing::debug!(?answers, "init answers");

    // The registry only supplies cn and the stylesheet; both have fallbacks
    let registry = match helpers::load_registry(registry, ValidationMode::Lenient) {
        Ok(registry) => Some(registry),
        Err(e) => {
            logger::warn(&format!("{e}; using built-in defaults"));
            None
        }
    };

    // 1. components.json
    let config = answers.config();
    let config_file = write_config(&root, &config)?;
    logger::success(&format!(
        "Created {}",
        logger::file(&relative(&root, &config_file))
    ));

    // 2. cn helper
    let cn_path = install_cn(&root, &config, answers.typescript, registry.as_ref())?;
    logger::success(&format!("Created {}", logger::file(&relative(&root, &cn_path))));

    // 3. base stylesheet
    let css_file = resolve_alias(&root, config.css_path());
    match registry.as_ref().map(read_base_css).transpose()?.flatten() {
        Some(base_css) => inject_css(&root, &css_file, &base_css)?,
        None => logger::warn(&format!(
            "Registry has no {BASE_CSS_FILE}; skipped glass styles"
        )),
    }

    print_next_steps(&root);
    Ok(())
}

/// Install `cn` from the registry, or the built-in fallback
fn install_cn(
    root: &Path,
    config: &ProjectConfig,
    typescript: bool,
    registry: Option<&Registry>,
) -> Result<PathBuf> {
    let file_name = if typescript { "cn.ts" } else { "cn.js" };
    let dest = resolve_alias(root, config.utils_alias()).join(file_name);

    let content = match registry.map(registry_cn_source).transpose()?.flatten() {
        Some(source) => source,
        None => {
            tracing::debug!("no cn source in registry, writing fallback");
            cn_fallback(typescript).to_string()
        }
    };

    write_file(&dest, &content)?;
    Ok(dest)
}

/// First file of the registry's `cn` utility, if it exists on disk
fn registry_cn_source(registry: &Registry) -> Result<Option<String>> {
    let Some(file) = registry
        .util(CN_UTIL)
        .and_then(|util| util.entry.files.first())
    else {
        return Ok(None);
    };
    read_optional(&registry.source_root().join(file))
}

fn read_base_css(registry: &Registry) -> Result<Option<String>> {
    read_optional(&registry.source_root().join(BASE_CSS_FILE))
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .map_err(|e| SandboxError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}

fn cn_fallback(typescript: bool) -> &'static str {
    if typescript {
        CN_FALLBACK_TS
    } else {
        CN_FALLBACK_JS
    }
}

/// What to do with the project's CSS file
#[derive(Debug, Clone, PartialEq, Eq)]
enum CssInjection {
    AlreadyPresent,
    Append(String),
    Create(String),
}

/// Decide how to add `base_css` to the current CSS file content
fn plan_css_injection(existing: Option<&str>, base_css: &str) -> CssInjection {
    let base = base_css.trim_end();
    match existing {
        Some(css) if css.contains(CSS_MARKER) || css.contains(base) => {
            CssInjection::AlreadyPresent
        }
        Some(css) => CssInjection::Append(format!("{css}\n\n{base}\n")),
        None => CssInjection::Create(format!("{base}\n")),
    }
}

fn inject_css(root: &Path, css_file: &Path, base_css: &str) -> Result<()> {
    let existing = read_optional(css_file)?;
    let shown = logger::file(&relative(root, css_file));

    match plan_css_injection(existing.as_deref(), base_css) {
        CssInjection::AlreadyPresent => {
            logger::info("Base glass styles already present in CSS, skipped.");
        }
        CssInjection::Append(content) => {
            write_file(css_file, &content)?;
            logger::success(&format!("Injected glass styles into {shown}"));
        }
        CssInjection::Create(content) => {
            write_file(css_file, &content)?;
            logger::success(&format!("Created {shown} with glass styles"));
        }
    }
    Ok(())
}

fn print_next_steps(root: &Path) {
    logger::blank();
    logger::title("Done!");

    let needed: Vec<String> = CN_PACKAGES.iter().map(ToString::to_string).collect();
    let missing = missing_packages(&needed, &PackageManifest::read(root));
    if !missing.is_empty() {
        logger::info("Install required dependencies:");
        logger::command(&PackageManager::detect(root).install_command(&missing));
    }

    logger::info("Then add your first component:");
    logger::command("sandbox-ui add button");
}
