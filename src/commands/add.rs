//! Add command implementation
//!
//! Control flow: config, registry (+ validation), unknown-name check,
//! resolution, confirmation, planning, writing, then the package hint.

use std::path::{Path, PathBuf};

use inquire::Confirm;

use crate::cli::AddArgs;
use crate::commands::helpers::{self, relative};
use crate::commands::list::print_catalog;
use crate::config::require_config;
use crate::error::Result;
use crate::installer::{
    DiskSources, FileOutcome, FixedAnswer, InstallReport, InstallWrites, MaterializeOptions,
    OverwritePolicy, PlanTarget, Prompter, materialize, plan_install,
};
use crate::resolver::packages::{
    PackageManager, PackageManifest, collect_packages, missing_packages,
};
use crate::resolver::{InstallPlan, resolve};
use crate::ui::logger;
use crate::ui::progress::{
    InteractiveProgressReporter, ProgressReporter, SilentProgressReporter,
};

/// Asks on the terminal before overwriting a file
struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn confirm_overwrite(&mut self, display_path: &str) -> Result<bool> {
        let answer = Confirm::new(&format!("{display_path} already exists. Overwrite?"))
            .with_default(false)
            .prompt()?;
        Ok(answer)
    }
}

/// Run add command
pub fn run(cwd: Option<PathBuf>, registry: Option<PathBuf>, args: AddArgs) -> Result<()> {
    let root = helpers::project_root(cwd)?;

    if args.components.is_empty() {
        let registry = helpers::load_registry(registry, args.validation.mode())?;
        print_catalog(&registry);
        logger::blank();
        logger::info("Usage:");
        logger::command("sandbox-ui add <component...>");
        return Ok(());
    }

    let config = require_config(&root)?;
    let registry = helpers::load_registry(registry, args.validation.mode())?;
    registry.ensure_known(&args.components)?;

    let plan = resolve(&args.components, &registry);
    tracing::debug!("{} item(s), {} file(s) to install", plan.len(), plan.file_count());
    if plan.is_empty() {
        logger::info("Nothing to install.");
        return Ok(());
    }
    let packages = collect_packages(&plan);
    print_plan(&plan);

    if !args.yes && !args.dry_run && !confirm_install(plan.file_count())? {
        logger::info("Cancelled.");
        return Ok(());
    }

    let target = PlanTarget {
        config: &config,
        project_root: &root,
        source_root: registry.source_root(),
    };
    let planned = plan_install(&plan, &target, &DiskSources)?;
    report_unplanned(&planned);

    let options = MaterializeOptions {
        policy: args.overwrite_policy(),
        dry_run: args.dry_run,
    };
    let attended = console::user_attended();

    let mut prompter: Box<dyn Prompter> = if attended {
        Box::new(InquirePrompter)
    } else {
        if options.policy == OverwritePolicy::Prompt && !options.dry_run {
            tracing::debug!("no terminal attached, keeping existing files");
        }
        Box::new(FixedAnswer(false))
    };
    let mut reporter: Box<dyn ProgressReporter> =
        if attended && options.policy != OverwritePolicy::Prompt && !options.dry_run {
            Box::new(InteractiveProgressReporter::new())
        } else {
            Box::new(SilentProgressReporter)
        };

    let report = materialize(
        &planned.writes,
        &root,
        options,
        prompter.as_mut(),
        reporter.as_mut(),
    )?;

    print_report(&root, &report, args.dry_run);
    print_package_hint(&root, &packages);
    Ok(())
}

fn print_plan(plan: &InstallPlan<'_>) {
    logger::title("Components to install");
    for item in plan {
        logger::info(&format!(
            "{} - {}",
            logger::bold(&item.label()),
            item.entry.description
        ));
    }
    logger::blank();
}

fn confirm_install(file_count: usize) -> Result<bool> {
    let proceed = Confirm::new(&format!("Install {file_count} file(s)?"))
        .with_default(true)
        .prompt()?;
    Ok(proceed)
}

fn report_unplanned(planned: &InstallWrites) {
    for file in &planned.missing {
        logger::warn(&format!("Source file not found: {file}, skipping"));
    }
    for file in &planned.collisions {
        logger::warn(&format!(
            "{file} has the same name as a file already being installed, skipping"
        ));
    }
}

/// Verb shown in front of a file for each outcome
fn outcome_verb(outcome: FileOutcome, dry_run: bool) -> &'static str {
    match (outcome, dry_run) {
        (FileOutcome::Created, false) => "Created",
        (FileOutcome::Created, true) => "Would create",
        (FileOutcome::Overwritten, false) => "Updated",
        (FileOutcome::Overwritten, true) => "Would overwrite",
        (FileOutcome::Skipped, _) => "Skipped",
        (FileOutcome::Unchanged, _) => "Unchanged",
        (FileOutcome::Conflict, _) => "Exists, would ask before overwriting",
    }
}

fn print_report(root: &Path, report: &InstallReport, dry_run: bool) {
    for (path, outcome) in &report.files {
        let shown = relative(root, path);
        let line = format!("{} {}", outcome_verb(*outcome, dry_run), logger::file(&shown));
        match outcome {
            FileOutcome::Created | FileOutcome::Overwritten if !dry_run => logger::success(&line),
            FileOutcome::Conflict => logger::warn(&line),
            FileOutcome::Created | FileOutcome::Overwritten => logger::info(&line),
            FileOutcome::Skipped | FileOutcome::Unchanged => logger::dim(&line),
        }
    }

    logger::blank();
    if dry_run {
        logger::info(&format!(
            "Dry run: {} file(s) would be written.",
            report.written()
        ));
    } else {
        logger::success(&format!("Installed {} file(s).", report.written()));
    }
}

fn print_package_hint(root: &Path, packages: &[String]) {
    let missing = missing_packages(packages, &PackageManifest::read(root));
    if missing.is_empty() {
        return;
    }

    logger::blank();
    logger::info("Install required dependencies:");
    logger::command(&PackageManager::detect(root).install_command(&missing));
}
