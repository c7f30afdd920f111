//! Coresmith CLI - core registry and dependency resolver

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use coresmith::util::diagnostic;
use coresmith::ResolveError;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color) {
        match e.downcast_ref::<ResolveError>() {
            Some(err) => diagnostic::emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("coresmith=debug")
    } else {
        EnvFilter::new("coresmith=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(color)
        .without_time()
        .init();

    let manager = commands::load_registry(&cli, color)?;

    // Execute command
    match cli.command {
        Commands::List(args) => commands::list::execute(args, &manager),
        Commands::Show(args) => commands::show::execute(args, &manager),
        Commands::Systems => commands::systems::execute(&manager),
        Commands::Deps(args) => commands::deps::execute(args, &manager),
        Commands::Get(args) => commands::get::execute(args, &manager),
        Commands::Roots => commands::roots::execute(&manager),
    }
}
