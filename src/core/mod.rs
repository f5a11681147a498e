//! Core business logic abstractions

pub mod config;
pub mod conversion;
pub mod currency;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use conversion::{ConversionError, ConversionOption, ConversionRequest, StateError};
pub use currency::Currency;
pub use rates::{FetchError, RateProvider, RateTable};
