//! Turning an install plan into files in the consumer's project
//!
//! This module handles:
//! - Planning destinations and rewriting imports ([`plan`], [`rewrite`])
//! - Deciding what to do with existing files ([`overwrite`])
//! - Writing the planned files ([`materialize`])

pub mod materialize;
pub mod overwrite;
pub mod plan;
pub mod rewrite;

pub use materialize::{
    FileOutcome, FixedAnswer, InstallReport, MaterializeOptions, Prompter, display_path, materialize,
};
pub use overwrite::OverwritePolicy;
pub use plan::{DiskSources, InstallWrites, PlanTarget, plan_install};
