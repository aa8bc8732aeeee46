//! github-interactive - Main Entry Point
//!
//! Parses the command line, loads the shell configuration and starts the
//! interactive prompt for the repository in the current directory.

use std::path::PathBuf;
use std::process;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use github_interactive::{CliPrompter, CommandRegistry, PreviewManager, ShellConfig};
use tracing_subscriber::EnvFilter;

/// Interactive session for managing this project's GitHub repository.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Configuration file (defaults to the per-user location).
    #[arg(long)]
    config: Option<PathBuf>,

    /// History file to use instead of the configured one.
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Name of the user or organisation owning the repository.
    #[arg(long)]
    owner: Option<String>,

    /// The repository belongs to a user rather than an organisation.
    #[arg(long)]
    no_org: bool,

    /// Print the effective configuration and exit.
    #[arg(long)]
    show_config: bool,
}

fn main() {
    init_logging();

    if let Err(e) = run(Args::parse()) {
        eprintln!("ERROR: {:#}", e);
        process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> anyhow::Result<ShellConfig> {
    let mut config = match &args.config {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::load_default()?,
    };

    if let Some(history_file) = &args.history_file {
        config.history_file = Some(history_file.clone());
    }
    if let Some(owner) = &args.owner {
        config.owner = Some(owner.clone());
    }
    if args.no_org {
        config.org = false;
    }
    Ok(config)
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(&args)?;

    if args.show_config {
        for line in config.get_summary() {
            println!("{}", line);
        }
        return Ok(());
    }

    let repo_dir = std::env::current_dir().context("cannot determine the working directory")?;
    let registry = Rc::new(CommandRegistry::repo_helper());
    let manager = PreviewManager::new(repo_dir, config.owner.clone());

    let mut prompter = CliPrompter::new(&config, registry, manager)?;
    prompter.run()?;
    Ok(())
}
