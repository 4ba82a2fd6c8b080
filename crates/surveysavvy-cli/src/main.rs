//! SurveySavvy CLI - Command-line interface for unit survey report ingestion.

use clap::Parser;
use surveysavvy_cli::commands;
use surveysavvy_cli::config::OutputFormat;
use surveysavvy_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Config may be what failed, so only the flag decides color here
    let errors = Formatter::new(OutputFormat::Table, !cli.no_color);
    if let Err(e) = run(cli) {
        eprintln!("{}", errors.error(&format!("Error: {}", e)));
        std::process::exit(1);
    }
}

/// Log to stderr; `-v` forces debug, otherwise `RUST_LOG` or info.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> surveysavvy_cli::Result<()> {
    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let config = Config::load_from(&config_path)?;
    config.validate()?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);
    let database = cli.database.unwrap_or_else(|| config.database.clone());

    match cli.command {
        Command::InitDb => commands::execute_init_db(&database, &config, &config_path, &formatter),
        Command::Import(args) => commands::execute_import(args, &config, &database, &formatter),
        Command::Inspect(args) => commands::execute_inspect(args, &config, &formatter),
        Command::List(args) => commands::execute_list(args, &database, &formatter),
    }
}
