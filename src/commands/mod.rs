//! Command implementations for the sandbox-ui CLI

pub mod add;
pub mod completions;
pub mod helpers;
pub mod init;
pub mod list;
pub mod version;
