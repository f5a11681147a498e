//! Supported currencies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Ars,
    Brl,
    Cop,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Ars, Currency::Brl, Currency::Cop];

    /// ISO 4217 code, as used by the rate provider.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Ars => "ARS",
            Currency::Brl => "BRL",
            Currency::Cop => "COP",
        }
    }

    /// Display name shown in the menu.
    pub fn name(&self) -> &'static str {
        match self {
            Currency::Usd => "Dólar",
            Currency::Ars => "Peso Argentino",
            Currency::Brl => "Real Brasileño",
            Currency::Cop => "Peso Colombiano",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Moneda no soportada: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownCurrency(code.to_string()))
    }
}
