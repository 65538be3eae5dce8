//! Applying planned writes to disk
//!
//! The materializer walks the planned writes in order, asks
//! [`overwrite::decide`](super::overwrite::decide) what to do with each
//! destination and delegates questions to a [`Prompter`]. The prompt itself
//! lives in the CLI layer.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SandboxError};
use crate::ui::progress::ProgressReporter;

use super::overwrite::{Decision, OverwritePolicy, decide, same_content};
use super::plan::FileWrite;

/// Answers overwrite questions
pub trait Prompter {
    /// Ask whether `display_path`, which already exists, may be overwritten
    fn confirm_overwrite(&mut self, display_path: &str) -> Result<bool>;
}

/// Prompter that answers every question the same way
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Prompter for FixedAnswer {
    fn confirm_overwrite(&mut self, _display_path: &str) -> Result<bool> {
        Ok(self.0)
    }
}

/// What happened to one destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Created,
    Overwritten,
    Skipped,
    /// Destination already had the planned content
    Unchanged,
    /// Dry run only: the destination exists and would need confirmation
    Conflict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub files: Vec<(PathBuf, FileOutcome)>,
}

impl InstallReport {
    pub fn count(&self, outcome: FileOutcome) -> usize {
        self.files.iter().filter(|(_, o)| *o == outcome).count()
    }

    /// Files created or overwritten
    pub fn written(&self) -> usize {
        self.count(FileOutcome::Created) + self.count(FileOutcome::Overwritten)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterializeOptions {
    pub policy: OverwritePolicy,
    pub dry_run: bool,
}

/// Write planned files
///
/// Paths in the report and in prompts are shown relative to `project_root`.
/// The first write error aborts the remaining writes.
pub fn materialize(
    writes: &[FileWrite],
    project_root: &Path,
    options: MaterializeOptions,
    prompter: &mut dyn Prompter,
    reporter: &mut dyn ProgressReporter,
) -> Result<InstallReport> {
    let mut report = InstallReport::default();
    reporter.start(writes.len() as u64);

    for write in writes {
        let shown = display_path(project_root, &write.dest_path);
        let outcome = match apply(write, &shown, options, prompter) {
            Ok(outcome) => outcome,
            Err(e) => {
                reporter.abandon();
                return Err(e);
            }
        };
        tracing::debug!(
            "{} '{}': {} -> {shown}: {outcome:?}",
            write.kind,
            write.item,
            write.source_path.display()
        );
        reporter.file_done(&shown);
        report.files.push((write.dest_path.clone(), outcome));
    }

    reporter.finish();
    Ok(report)
}

fn apply(
    write: &FileWrite,
    display: &str,
    options: MaterializeOptions,
    prompter: &mut dyn Prompter,
) -> Result<FileOutcome> {
    let content = write.content.as_str();
    let identical = write.destination_exists
        && fs::read(&write.dest_path)
            .is_ok_and(|existing| same_content(&existing, content.as_bytes()));

    let decision = decide(write.destination_exists, identical, options.policy);
    let overwrite = match decision {
        Decision::Unchanged => return Ok(FileOutcome::Unchanged),
        Decision::Skip => return Ok(FileOutcome::Skipped),
        Decision::Prompt if options.dry_run => return Ok(FileOutcome::Conflict),
        Decision::Prompt => {
            if !prompter.confirm_overwrite(display)? {
                return Ok(FileOutcome::Skipped);
            }
            true
        }
        Decision::Write => write.destination_exists,
    };

    if !options.dry_run {
        write_file(&write.dest_path, content)?;
    }

    Ok(if overwrite {
        FileOutcome::Overwritten
    } else {
        FileOutcome::Created
    })
}

pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    let write_error = |e: std::io::Error| SandboxError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, content).map_err(write_error)
}

pub fn display_path(project_root: &Path, path: &Path) -> String {
    path.strip_prefix(project_root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::installer::plan::FileContent;
    use crate::registry::ItemKind;
    use crate::test_fixtures::create_temp_dir;
    use crate::ui::progress::SilentProgressReporter;

    /// Records the questions it was asked
    struct RecordingPrompter {
        answer: bool,
        asked: Vec<String>,
    }

    impl Prompter for RecordingPrompter {
        fn confirm_overwrite(&mut self, display_path: &str) -> Result<bool> {
            self.asked.push(display_path.to_string());
            Ok(self.answer)
        }
    }

    fn planned(root: &Path, relative: &str, content: &str) -> FileWrite {
        let dest_path = root.join(relative);
        FileWrite {
            kind: ItemKind::Component,
            item: "button".to_string(),
            source_path: PathBuf::from("/registry/components/ui/button.tsx"),
            dest_alias: format!("@/{relative}"),
            destination_exists: dest_path.exists(),
            dest_path,
            content: FileContent::Rewritten(content.to_string()),
        }
    }

    fn run(
        writes: &[FileWrite],
        root: &Path,
        options: MaterializeOptions,
        prompter: &mut dyn Prompter,
    ) -> InstallReport {
        materialize(writes, root, options, prompter, &mut SilentProgressReporter).unwrap()
    }

    #[test]
    fn test_creates_files_and_directories() {
        let temp = create_temp_dir();
        let writes = vec![planned(temp.path(), "components/ui/button.tsx", "new")];

        let report = run(
            &writes,
            temp.path(),
            MaterializeOptions::default(),
            &mut FixedAnswer(false),
        );

        assert_eq!(report.count(FileOutcome::Created), 1);
        assert_eq!(
            fs::read_to_string(temp.path().join("components/ui/button.tsx")).unwrap(),
            "new"
        );
    }

    #[test]
    fn test_prompt_declined_keeps_existing() {
        let temp = create_temp_dir();
        fs::create_dir_all(temp.path().join("components/ui")).unwrap();
        fs::write(temp.path().join("components/ui/button.tsx"), "edited").unwrap();
        let writes = vec![planned(temp.path(), "components/ui/button.tsx", "new")];
        let mut prompter = RecordingPrompter {
            answer: false,
            asked: Vec::new(),
        };

        let report = run(&writes, temp.path(), MaterializeOptions::default(), &mut prompter);

        assert_eq!(prompter.asked, vec!["components/ui/button.tsx"]);
        assert_eq!(report.count(FileOutcome::Skipped), 1);
        assert_eq!(
            fs::read_to_string(temp.path().join("components/ui/button.tsx")).unwrap(),
            "edited"
        );
    }

    #[test]
    fn test_prompt_accepted_overwrites() {
        let temp = create_temp_dir();
        fs::create_dir_all(temp.path().join("lib")).unwrap();
        fs::write(temp.path().join("lib/cn.ts"), "old").unwrap();
        let writes = vec![planned(temp.path(), "lib/cn.ts", "new")];

        let report = run(
            &writes,
            temp.path(),
            MaterializeOptions::default(),
            &mut FixedAnswer(true),
        );

        assert_eq!(report.count(FileOutcome::Overwritten), 1);
        assert_eq!(report.written(), 1);
        assert_eq!(fs::read_to_string(temp.path().join("lib/cn.ts")).unwrap(), "new");
    }

    #[test]
    fn test_identical_content_is_not_prompted() {
        let temp = create_temp_dir();
        fs::write(temp.path().join("cn.ts"), "same").unwrap();
        let writes = vec![planned(temp.path(), "cn.ts", "same")];
        let mut prompter = RecordingPrompter {
            answer: true,
            asked: Vec::new(),
        };

        let report = run(&writes, temp.path(), MaterializeOptions::default(), &mut prompter);

        assert!(prompter.asked.is_empty());
        assert_eq!(report.count(FileOutcome::Unchanged), 1);
    }

    #[test]
    fn test_skip_policy_never_prompts() {
        let temp = create_temp_dir();
        fs::write(temp.path().join("card.tsx"), "mine").unwrap();
        let writes = vec![
            planned(temp.path(), "card.tsx", "theirs"),
            planned(temp.path(), "badge.tsx", "fresh"),
        ];
        let options = MaterializeOptions {
            policy: OverwritePolicy::Skip,
            dry_run: false,
        };

        let report = run(&writes, temp.path(), options, &mut FixedAnswer(true));

        assert_eq!(report.count(FileOutcome::Skipped), 1);
        assert_eq!(report.count(FileOutcome::Created), 1);
        assert_eq!(fs::read_to_string(temp.path().join("card.tsx")).unwrap(), "mine");
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let temp = create_temp_dir();
        fs::write(temp.path().join("card.tsx"), "mine").unwrap();
        let writes = vec![
            planned(temp.path(), "card.tsx", "theirs"),
            planned(temp.path(), "ui/badge.tsx", "fresh"),
        ];
        let options = MaterializeOptions {
            policy: OverwritePolicy::Prompt,
            dry_run: true,
        };

        let report = run(&writes, temp.path(), options, &mut FixedAnswer(true));

        assert_eq!(report.count(FileOutcome::Conflict), 1);
        assert_eq!(report.count(FileOutcome::Created), 1);
        assert!(!temp.path().join("ui").exists());
        assert_eq!(fs::read_to_string(temp.path().join("card.tsx")).unwrap(), "mine");
    }

    #[test]
    fn test_display_path() {
        assert_eq!(
            display_path(Path::new("/app"), Path::new("/app/lib/cn.ts")),
            "lib/cn.ts"
        );
        assert_eq!(
            display_path(Path::new("/app"), Path::new("/elsewhere/cn.ts")),
            "/elsewhere/cn.ts"
        );
    }
}
