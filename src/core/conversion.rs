//! Conversion arithmetic and the menu's option table

use super::currency::Currency;
use super::rates::RateTable;

/// One numbered entry of the conversion menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionOption {
    pub number: u32,
    pub source: Currency,
    pub destination: Currency,
}

const fn option(number: u32, source: Currency, destination: Currency) -> ConversionOption {
    ConversionOption {
        number,
        source,
        destination,
    }
}

const OPTION_COUNT: usize = 6;

pub static CONVERSION_OPTIONS: [ConversionOption; OPTION_COUNT] = [
    option(1, Currency::Usd, Currency::Ars),
    option(2, Currency::Ars, Currency::Usd),
    option(3, Currency::Usd, Currency::Brl),
    option(4, Currency::Brl, Currency::Usd),
    option(5, Currency::Usd, Currency::Cop),
    option(6, Currency::Cop, Currency::Usd),
];

/// Menu number that leaves the program, right after the last conversion.
pub const EXIT_OPTION: u32 = OPTION_COUNT as u32 + 1;

pub fn find_option(number: i64) -> Option<&'static ConversionOption> {
    CONVERSION_OPTIONS
        .iter()
        .find(|o| i64::from(o.number) == number)
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("Cantidad no válida. Por favor, ingrese un valor numérico.")]
    NotANumber(String),
    #[error("La cantidad a convertir debe ser un valor positivo.")]
    NotPositive,
}

/// Parses user input as an amount. Only finite numbers are accepted; the sign
/// is checked by [`ConversionRequest::new`].
pub fn parse_amount(input: &str) -> Result<f64, AmountError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(AmountError::NotANumber(trimmed.to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRequest {
    source: Currency,
    destination: Currency,
    amount: f64,
}

impl ConversionRequest {
    pub fn new(source: Currency, destination: Currency, amount: f64) -> Result<Self, AmountError> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(AmountError::NotPositive);
        }
        Ok(ConversionRequest {
            source,
            destination,
            amount,
        })
    }

    pub fn source(&self) -> Currency {
        self.source
    }

    pub fn destination(&self) -> Currency {
        self.destination
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}

/// The rate table is missing a currency it should always have once loaded.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StateError {
    #[error("Tasa de cambio no encontrada para {0}.")]
    MissingRate(Currency),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error("El resultado de la conversión está fuera de rango.")]
    OutOfRange,
}

/// Converts using the cross-rate `rate[destination] / rate[source]`.
pub fn convert(request: &ConversionRequest, rates: &RateTable) -> Result<f64, ConversionError> {
    let rate_of = |currency: Currency| {
        rates
            .rate(currency)
            .filter(|r| *r != 0.0)
            .ok_or(StateError::MissingRate(currency))
    };
    let source_rate = rate_of(request.source)?;
    let destination_rate = rate_of(request.destination)?;

    let converted = request.amount * (destination_rate / source_rate);
    if !converted.is_finite() {
        return Err(ConversionError::OutOfRange);
    }
    Ok(converted)
}
