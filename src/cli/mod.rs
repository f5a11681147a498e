//! Console front-end: rate loading, the interactive menu and one-shot commands

pub mod convert;
pub mod menu;
pub mod rates;
pub mod setup;
pub mod ui;

use crate::core::{ConversionRequest, FetchError, RateProvider, RateTable};
use anyhow::Result;
use std::io::Write;
use tracing::error;

/// The rate table could not be loaded and the cause has already been shown
/// to the user on stderr.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct RatesUnavailable(#[from] pub FetchError);

/// Fetches the rate table for the session.
///
/// A failure is fatal: the cause is reported on stderr and returned as
/// [`RatesUnavailable`], and the caller must not go on to show the menu.
pub async fn load_rates<W: Write>(provider: &dyn RateProvider, output: &mut W) -> Result<RateTable> {
    writeln!(output, "Cargando tasas de cambio en tiempo real...")?;
    output.flush()?;

    let spinner = ui::new_spinner("Consultando el proveedor de tasas");
    let result = provider.fetch_rates().await;
    spinner.finish_and_clear();

    match result {
        Ok(table) => {
            let updated = table
                .updated_at()
                .map(|t| format!(" (actualizadas {})", t.format("%Y-%m-%d %H:%M UTC")))
                .unwrap_or_default();
            writeln!(
                output,
                "Tasas cargadas con éxito. Base: {}{}\n",
                table.base(),
                updated
            )?;
            Ok(table)
        }
        Err(e) => {
            error!(error = %e, "Failed to load exchange rates");
            eprintln!("ERROR al obtener las tasas de cambio de la API:");
            eprintln!("{e}");
            eprintln!("El programa no puede continuar sin tasas de cambio.");
            Err(RatesUnavailable(e).into())
        }
    }
}

/// Whether the user has already been told why `err` happened.
pub fn is_reported(err: &anyhow::Error) -> bool {
    err.downcast_ref::<RatesUnavailable>().is_some()
}

pub(crate) fn result_line(request: &ConversionRequest, converted: f64) -> String {
    format!(
        "Resultado: {:.2} {} equivalen a {:.2} {}",
        request.amount(),
        request.source(),
        converted,
        request.destination()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Currency;
    use async_trait::async_trait;

    struct FixedProvider(Option<RateTable>);

    #[async_trait]
    impl RateProvider for FixedProvider {
        async fn fetch_rates(&self) -> Result<RateTable, FetchError> {
            self.0.clone().ok_or(FetchError::MissingRates)
        }
    }

    #[tokio::test]
    async fn test_load_rates_reports_base() {
        let table = RateTable::new(Currency::Usd, [(Currency::Usd, 1.0)]);
        let provider = FixedProvider(Some(table.clone()));
        let mut output = Vec::new();

        let loaded = load_rates(&provider, &mut output).await.unwrap();

        assert_eq!(loaded, table);
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Cargando tasas de cambio en tiempo real..."));
        assert!(text.contains("Tasas cargadas con éxito. Base: USD"));
    }

    #[tokio::test]
    async fn test_load_rates_failure_is_returned() {
        let provider = FixedProvider(None);
        let mut output = Vec::new();

        let err = load_rates(&provider, &mut output).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RatesUnavailable>(),
            Some(RatesUnavailable(FetchError::MissingRates))
        ));
        assert_eq!(
            err.to_string(),
            "La respuesta de la API no incluye tasas de cambio."
        );
        let text = String::from_utf8(output).unwrap();
        assert!(!text.contains("Tasas cargadas"));
        assert!(is_reported(&err));
    }

    #[test]
    fn test_other_errors_are_not_reported() {
        let err = anyhow::anyhow!("Failed to read config file: missing.yaml");
        assert!(!is_reported(&err));
        let err = anyhow::Error::from(FetchError::MissingApiKey);
        assert!(!is_reported(&err));
    }

    #[test]
    fn test_result_line_uses_two_decimals() {
        let request = ConversionRequest::new(Currency::Usd, Currency::Ars, 10.0).unwrap();
        assert_eq!(
            result_line(&request, 10000.0),
            "Resultado: 10.00 USD equivalen a 10000.00 ARS"
        );
    }
}
