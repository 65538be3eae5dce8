//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::installer::OverwritePolicy;
use crate::registry::validation::ValidationMode;

/// sandbox-ui - glassmorphism component installer
///
/// Copy components from the sandbox-ui registry into your project.
#[derive(Parser, Debug)]
#[command(
    name = "sandbox-ui",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Add glassmorphism components to your project.",
    long_about = "Add glassmorphism components to your project.\n\n\
                  sandbox-ui copies glass components and the utilities they need from its \
                  registry into your project, rewriting imports to match your aliases.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  sandbox-ui init\n    \
                  sandbox-ui add button card pricing\n    \
                  sandbox-ui add navbar --yes\n    \
                  sandbox-ui list"
)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(long, global = true, env = "SANDBOX_UI_CWD")]
    pub cwd: Option<PathBuf>,

    /// Registry catalog (defaults to registry.json next to the executable)
    #[arg(long, global = true, env = "SANDBOX_UI_REGISTRY")]
    pub registry: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize your project with sandbox-ui base styles and config
    Init(InitArgs),

    /// Add components to your project
    Add(AddArgs),

    /// List available components
    List(ListArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the init command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Interactive setup:\n    sandbox-ui init\n\n\
                  Accept all defaults:\n    sandbox-ui init --yes\n\n\
                  Custom locations:\n    sandbox-ui init -y --components @/ui --utils @/utils --css src/index.css")]
pub struct InitArgs {
    /// Skip prompts and use defaults
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Where components are installed
    #[arg(long, value_name = "ALIAS")]
    pub components: Option<String>,

    /// Where utilities (cn, etc.) are installed
    #[arg(long, value_name = "ALIAS")]
    pub utils: Option<String>,

    /// Path to the global CSS file
    #[arg(long, value_name = "PATH")]
    pub css: Option<String>,

    /// Install JavaScript instead of TypeScript utilities
    #[arg(long)]
    pub js: bool,
}

/// Registry validation flag shared by commands that load the registry
#[derive(Args, Debug, Clone, Copy)]
pub struct ValidationArgs {
    /// Fail if the registry has dangling dependencies, cycles or colliding files
    #[arg(long)]
    pub strict: bool,
}

impl ValidationArgs {
    pub fn mode(self) -> ValidationMode {
        if self.strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Lenient
        }
    }
}

/// Arguments for the add command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List available components:\n    sandbox-ui add\n\n\
                  Add components:\n    sandbox-ui add button card pricing\n\n\
                  Add without confirmation, overwriting existing files:\n    sandbox-ui add navbar -y\n\n\
                  Keep files you already have:\n    sandbox-ui add navbar -y --skip-existing\n\n\
                  Preview what would be written:\n    sandbox-ui add navbar --dry-run")]
pub struct AddArgs {
    /// Component names to add
    pub components: Vec<String>,

    /// Skip confirmation prompts
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Overwrite existing files without asking
    #[arg(long, conflicts_with = "skip_existing")]
    pub overwrite: bool,

    /// Keep existing files without asking
    #[arg(long)]
    pub skip_existing: bool,

    /// Show what would be installed without writing anything
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub validation: ValidationArgs,
}

impl AddArgs {
    /// `--skip-existing` wins over `--yes`; `--yes` alone overwrites
    pub fn overwrite_policy(&self) -> OverwritePolicy {
        if self.skip_existing {
            OverwritePolicy::Skip
        } else if self.overwrite || self.yes {
            OverwritePolicy::Overwrite
        } else {
            OverwritePolicy::Prompt
        }
    }
}

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List all components:\n    sandbox-ui list\n\n\
                  Check the registry while listing:\n    sandbox-ui list --strict")]
pub struct ListArgs {
    #[command(flatten)]
    pub validation: ValidationArgs,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    sandbox-ui completions --shell bash > ~/.bash_completion.d/sandbox-ui\n\n\
                  Generate zsh completions:\n    sandbox-ui completions --shell zsh > ~/.zfunc/_sandbox-ui\n\n\
                  Generate fish completions:\n    sandbox-ui completions --shell fish > ~/.config/fish/completions/sandbox-ui.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
