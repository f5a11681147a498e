use super::ui;
use crate::core::conversion;
use crate::core::{ConversionRequest, RateProvider};
use anyhow::Result;
use std::io::Write;

/// Performs a single conversion without entering the menu.
///
/// The request is validated before any rates are fetched.
pub async fn run<W: Write>(
    provider: &dyn RateProvider,
    request: ConversionRequest,
    output: &mut W,
) -> Result<()> {
    let rates = super::load_rates(provider, output).await?;
    let converted = conversion::convert(&request, &rates)?;
    let line = super::result_line(&request, converted);
    writeln!(output, "{}", ui::style_text(&line, ui::StyleType::Result))?;
    Ok(())
}
