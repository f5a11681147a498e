//! Exchange rate table and the provider abstraction that fills it

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::currency::Currency;

/// Rates for the supported currencies, relative to a single base currency.
///
/// Built once from a provider response and never mutated afterwards. Only
/// positive, finite rates are kept; anything else is treated as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base: Currency,
    rates: BTreeMap<Currency, f64>,
    updated_at: Option<DateTime<Utc>>,
}

impl RateTable {
    pub fn new(base: Currency, rates: impl IntoIterator<Item = (Currency, f64)>) -> Self {
        let rates = rates
            .into_iter()
            .filter(|(currency, rate)| {
                let usable = rate.is_finite() && *rate > 0.0;
                if !usable {
                    debug!(%currency, rate, "Discarding unusable rate");
                }
                usable
            })
            .collect();
        RateTable {
            base,
            rates,
            updated_at: None,
        }
    }

    /// Projects a provider's code-to-rate map onto the supported currencies.
    pub fn from_codes(base: Currency, codes: &HashMap<String, f64>) -> Self {
        debug!(
            received = codes.len(),
            "Projecting provider rates onto supported currencies"
        );
        Self::new(
            base,
            Currency::ALL
                .into_iter()
                .filter_map(|c| codes.get(c.code()).map(|rate| (c, *rate))),
        )
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn base(&self) -> Currency {
        self.base
    }

    pub fn rate(&self, currency: Currency) -> Option<f64> {
        self.rates.get(&currency).copied()
    }

    /// Provider timestamp of the last rate update, if it reported one.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn iter(&self) -> impl Iterator<Item = (Currency, f64)> + '_ {
        self.rates.iter().map(|(c, r)| (*c, *r))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Reasons the rate table could not be loaded. All of them are fatal for the
/// session.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(
        "No hay una clave de API válida configurada. Define provider.api_key o la variable CONVERSOR_API_KEY."
    )]
    MissingApiKey,
    #[error("Fallo la conexión con la API: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Fallo la conexión con la API. Código de estado: {0}")]
    Status(reqwest::StatusCode),
    #[error("La API devolvió un resultado no exitoso ({error_type}).")]
    Unsuccessful { error_type: String },
    #[error("La respuesta de la API no tiene un formato válido: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("La respuesta de la API no incluye tasas de cambio.")]
    MissingRates,
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the latest rates. Called once per session.
    async fn fetch_rates(&self) -> Result<RateTable, FetchError>;
}
