mod commands;
mod config;
mod input;
mod logging;
mod output;
mod remote;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::calculate::CalculateArgs;
use commands::options::OptionsArgs;
use commands::quote::QuoteArgs;
use config::RepayConfig;

/// Loan repayment calculations
#[derive(Parser)]
#[command(
    name = "repay",
    version,
    about = "Loan repayment calculations",
    long_about = "Price level loan repayments: raw annuity calculations, quotes \
                  against a loan option catalogue, and the catalogue itself. \
                  The catalogue comes from --config, the loan options API \
                  (REPAY_API_BASE_URL), or the built-in defaults."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Repayment per period for a raw amount, annual rate, frequency and term
    Calculate(CalculateArgs),
    /// Repayment quote for a purpose, period and term from the option catalogue
    Quote(QuoteArgs),
    /// List loan purposes, repayment periods and terms
    Options(OptionsArgs),
    /// Print version information
    Version,
}

type CommandResult = Result<serde_json::Value, Box<dyn std::error::Error>>;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(&cli.log_level) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Calculate(args) => {
            with_config(config_path, |config| commands::calculate::run_calculate(args, config))
        }
        Commands::Quote(args) => {
            with_config(config_path, |config| commands::quote::run_quote(args, config))
        }
        Commands::Options(args) => {
            with_config(config_path, |config| commands::options::run_options(args, config))
        }
        Commands::Version => {
            println!("repay {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

fn with_config(
    path: Option<&str>,
    run: impl FnOnce(&RepayConfig) -> CommandResult,
) -> CommandResult {
    let config = RepayConfig::load(path)?;
    run(&config)
}
