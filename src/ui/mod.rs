//! Terminal presentation layer
//!
//! This module handles:
//! - Styled status lines (info, success, warnings, command hints)
//! - Progress reporting while files are written
//!
//! Everything the user reads goes through here; diagnostics for developers go
//! through `tracing` instead.

pub mod logger;
pub mod progress;
