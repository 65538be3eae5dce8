//! sandbox-ui - glassmorphism component installer
//!
//! Copies components and the utilities they depend on from the sandbox-ui
//! registry into a project, in dependency order, with imports rewritten to the
//! project's aliases.

use clap::Parser;
use miette::Diagnostic;

mod cli;
mod commands;
mod config;
mod error;
mod installer;
mod logging;
mod registry;
mod resolver;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init(args) => commands::init::run(cli.cwd, cli.registry, args),
        Commands::Add(args) => commands::add::run(cli.cwd, cli.registry, args),
        Commands::List(args) => commands::list::run(cli.registry, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        if let Some(help) = e.help() {
            eprintln!();
            eprintln!("{help}");
        }
        std::process::exit(1);
    }
}
