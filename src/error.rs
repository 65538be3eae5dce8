//! Error types and handling for sandbox-ui
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for sandbox-ui operations
#[derive(Error, Diagnostic, Debug)]
pub enum SandboxError {
    // Registry errors
    #[error("Failed to load registry from {path}: {reason}")]
    #[diagnostic(
        code(sandbox_ui::registry::load_failed),
        help("Pass --registry <path> or set SANDBOX_UI_REGISTRY to a valid registry file")
    )]
    RegistryLoad { path: String, reason: String },

    #[error(
        "Registry validation failed with {} problem(s):\n{}",
        .problems.len(),
        bullet_list(.problems)
    )]
    #[diagnostic(
        code(sandbox_ui::registry::invalid),
        help("Fix the registry entries above, or run without --strict to install anyway")
    )]
    RegistryValidation { problems: Vec<String> },

    #[error(
        "Unknown component(s): {}\n\nAvailable components:\n{}",
        .unknown.join(", "),
        bullet_list(.available)
    )]
    #[diagnostic(
        code(sandbox_ui::registry::unknown_component),
        help("Run 'sandbox-ui list' to see every component with its description")
    )]
    UnknownComponent {
        unknown: Vec<String>,
        available: Vec<String>,
    },

    // Configuration errors
    #[error("No components.json found in {path}")]
    #[diagnostic(
        code(sandbox_ui::config::missing),
        help("Run 'sandbox-ui init' first")
    )]
    MissingConfig { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(sandbox_ui::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(sandbox_ui::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(sandbox_ui::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(sandbox_ui::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(sandbox_ui::fs::io_error))]
    IoError { message: String },

    // Terminal errors
    #[error("Failed to read answer: {message}")]
    #[diagnostic(
        code(sandbox_ui::prompt::failed),
        help("Use --yes to skip interactive prompts")
    )]
    PromptFailed { message: String },
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("  - {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl From<std::io::Error> for SandboxError {
    fn from(err: std::io::Error) -> Self {
        SandboxError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for SandboxError {
    fn from(err: inquire::InquireError) -> Self {
        SandboxError::PromptFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SandboxError>;
