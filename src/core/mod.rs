//! Core business logic abstractions

pub mod command;
pub mod config;
pub mod currency;
pub mod error;
pub mod log;
pub mod quote;

// Re-export main types for cleaner imports
pub use command::{Command, CommandParser};
pub use currency::CurrencyTable;
pub use error::{CommandError, ConversionError, ErrorKind, QuoteError};
pub use quote::QuoteProvider;
