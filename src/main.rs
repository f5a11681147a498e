use clap::{Parser, Subcommand};
use conversor::core::log::init_logging;
use conversor::core::{ConversionRequest, Currency};
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Interactive conversion menu (default)
    Menu,
    /// Display the loaded exchange rates
    Rates,
    /// Convert a single amount and exit
    Convert {
        /// Currency to convert from (USD, ARS, BRL, COP)
        #[arg(long)]
        from: Currency,
        /// Currency to convert to (USD, ARS, BRL, COP)
        #[arg(long)]
        to: Currency,
        /// Amount to convert, must be positive
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => conversor::cli::setup::setup(),
        Some(Commands::Convert { from, to, amount }) => {
            match ConversionRequest::new(from, to, amount) {
                Ok(request) => {
                    conversor::run_command(
                        conversor::AppCommand::Convert(request),
                        cli.config_path.as_deref(),
                    )
                    .await
                }
                Err(e) => Err(e.into()),
            }
        }
        Some(Commands::Rates) => {
            conversor::run_command(conversor::AppCommand::Rates, cli.config_path.as_deref()).await
        }
        Some(Commands::Menu) | None => {
            conversor::run_command(conversor::AppCommand::Menu, cli.config_path.as_deref()).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Application failed");
            // Rate failures have already been printed in full
            if !conversor::cli::is_reported(&e) {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
