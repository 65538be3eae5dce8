//! Overwrite policy for destinations that already exist
//!
//! Deciding what to do with an existing file is a pure function of the policy
//! and what is on disk. Asking the user is left to the caller: a
//! [`Decision::Prompt`] only says that a question is needed.

/// What to do when a destination file already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Ask for each existing file
    #[default]
    Prompt,
    /// Replace existing files
    Overwrite,
    /// Keep existing files
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Write,
    Skip,
    Prompt,
    /// Destination already holds exactly this content
    Unchanged,
}

pub fn decide(destination_exists: bool, identical: bool, policy: OverwritePolicy) -> Decision {
    if !destination_exists {
        return Decision::Write;
    }
    if identical {
        return Decision::Unchanged;
    }
    match policy {
        OverwritePolicy::Overwrite => Decision::Write,
        OverwritePolicy::Skip => Decision::Skip,
        OverwritePolicy::Prompt => Decision::Prompt,
    }
}

/// Compare file contents by blake3 digest
pub fn same_content(existing: &[u8], planned: &[u8]) -> bool {
    existing.len() == planned.len() && blake3::hash(existing) == blake3::hash(planned)
}
