//! Progress reporting for file writes
//!
//! All progress reporting goes through the [`ProgressReporter`] trait so the
//! materializer does not care whether a bar is drawn. The interactive bar is
//! only used when nothing else needs the terminal (no overwrite prompts, no
//! dry run).

use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter trait for file materialization
pub trait ProgressReporter {
    /// Announce how many files are about to be processed
    fn start(&mut self, total_files: u64);

    /// A file has been processed
    fn file_done(&mut self, display_path: &str);

    /// All files processed
    fn finish(&mut self);

    /// Stop early on error
    fn abandon(&mut self);
}

/// Interactive progress reporter drawing an indicatif bar
#[derive(Default)]
pub struct InteractiveProgressReporter {
    bar: Option<ProgressBar>,
}

impl InteractiveProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn start(&mut self, total_files: u64) {
        let style = ProgressStyle::default_bar()
            .template("  [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let bar = ProgressBar::new(total_files);
        bar.set_style(style);
        self.bar = Some(bar);
    }

    fn file_done(&mut self, display_path: &str) {
        if let Some(ref bar) = self.bar {
            // Keep the tail of long paths, it holds the file name
            let shown = if display_path.chars().count() > 50 {
                let tail: String = display_path
                    .chars()
                    .rev()
                    .take(47)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                format!("...{tail}")
            } else {
                display_path.to_string()
            };
            bar.set_message(shown);
            bar.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn abandon(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.abandon();
        }
    }
}

/// No-op reporter for dry runs, prompting runs and tests
#[derive(Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn start(&mut self, _total_files: u64) {}

    fn file_done(&mut self, _display_path: &str) {}

    fn finish(&mut self) {}

    fn abandon(&mut self) {}
}
