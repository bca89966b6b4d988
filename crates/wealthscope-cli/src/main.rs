//! Wealthscope CLI - Re-bracket the global wealth distribution from the terminal.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wealthscope_cli::commands;
use wealthscope_cli::repl;
use wealthscope_cli::{Cli, Command, Config, Formatter, Session};
use wealthscope_domain::DisplayMode;

fn main() {
    // Initialize tracing (log to stderr, RUST_LOG overrides)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> wealthscope_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config (read-only)
    let config = Config::load(cli.config.as_deref())?;

    // Engine configuration, with the policy flag taking precedence
    let engine = config.engine_config(cli.policy.map(Into::into))?;

    // Determine output format, color and display mode
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let mode: DisplayMode = cli.mode.map(Into::into).unwrap_or(config.settings.mode);

    let formatter = Formatter::new(format, color_enabled);

    // Dataset flag first, then the configured path, then the built-in brackets
    let dataset_path = cli.dataset.as_deref().or(config.dataset_path.as_deref());
    let loaded = commands::load_dataset(dataset_path, &engine)?;

    match cli.command {
        None | Some(Command::Repl) => {
            let thresholds = commands::resolve_thresholds(&[], None, &config, &loaded)?;
            let mut session = Session::new(loaded, engine, thresholds, mode);
            repl::run_repl(&mut session, &formatter, config.settings.history_size)?;
        }
        Some(Command::Breakdown(args)) => {
            commands::execute_breakdown(args, &loaded, &engine, &config, mode, &formatter)?;
        }
        Some(Command::Dataset) => {
            commands::execute_dataset(&loaded, &formatter)?;
        }
    }

    Ok(())
}
