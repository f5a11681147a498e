pub mod cli;
pub mod core;
pub mod providers;

pub use crate::core::config;

use crate::core::{ConversionRequest, RateProvider};
use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

pub enum AppCommand {
    /// Interactive menu, the default
    Menu,
    /// Print the loaded rate table
    Rates,
    /// One conversion, no menu
    Convert(ConversionRequest),
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Conversor starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!(
        base_url = %config.provider.base_url,
        base_currency = %config.base_currency,
        timeout_secs = config.provider.timeout_secs,
        "Loaded config"
    );

    let provider =
        providers::ExchangeRateApiProvider::new(&config.provider, config.base_currency)?;
    let mut stdout = io::stdout();

    match command {
        AppCommand::Menu => {
            let stdin = io::stdin();
            run_interactive(&provider, &mut stdin.lock(), &mut stdout).await
        }
        AppCommand::Rates => cli::rates::run(&provider, &mut stdout).await,
        AppCommand::Convert(request) => cli::convert::run(&provider, request, &mut stdout).await,
    }
}

/// Loads the rates once, then runs the menu over the given input and output.
/// The menu is never shown when the rates cannot be loaded.
pub async fn run_interactive<R: BufRead, W: Write>(
    provider: &dyn RateProvider,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let rates = cli::load_rates(provider, output).await?;
    cli::menu::run(&rates, input, output)
}
