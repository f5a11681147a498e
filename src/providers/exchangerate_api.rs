use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::config::ProviderConfig;
use crate::core::currency::Currency;
use crate::core::rates::{FetchError, RateProvider, RateTable};

/// Keys shipped in example configs; never worth a round trip.
const PLACEHOLDER_KEYS: [&str; 2] = ["YOUR_API_KEY", "TU_CLAVE_API_AQUI"];

/// Client for the exchangerate-api.com v6 "latest" endpoint.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
    base_currency: Currency,
    client: reqwest::Client,
}

impl ExchangeRateApiProvider {
    pub fn new(config: &ProviderConfig, base_currency: Currency) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent("conversor/1.0")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(ExchangeRateApiProvider {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.trim().to_string(),
            base_currency,
            client,
        })
    }

    fn url_with_key(&self, key: &str) -> String {
        format!(
            "{}/v6/{}/latest/{}",
            self.base_url,
            key,
            self.base_currency.code()
        )
    }

    fn has_usable_key(&self) -> bool {
        !self.api_key.is_empty()
            && !PLACEHOLDER_KEYS
                .iter()
                .any(|p| p.eq_ignore_ascii_case(&self.api_key))
    }
}

#[derive(Deserialize, Debug)]
struct LatestRatesResponse {
    result: String,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    time_last_update_unix: Option<i64>,
    conversion_rates: Option<HashMap<String, f64>>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(
        name = "ExchangeRateFetch",
        skip(self),
        fields(base = %self.base_currency)
    )]
    async fn fetch_rates(&self) -> Result<RateTable, FetchError> {
        if !self.has_usable_key() {
            return Err(FetchError::MissingApiKey);
        }

        debug!("Requesting latest rates from {}", self.url_with_key("***"));
        let response = self.client.get(self.url_with_key(&self.api_key)).send().await?;

        debug!(status = %response.status(), "Received rate provider response");
        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status()));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text)?;

        if data.result != "success" {
            return Err(FetchError::Unsuccessful {
                error_type: data.error_type.unwrap_or_else(|| data.result.clone()),
            });
        }

        let codes = data.conversion_rates.ok_or(FetchError::MissingRates)?;
        let mut table = RateTable::from_codes(self.base_currency, &codes);
        if let Some(updated) = data
            .time_last_update_unix
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
        {
            table = table.with_updated_at(updated);
        }

        debug!(rates = table.len(), "Loaded rate table");
        Ok(table)
    }
}
