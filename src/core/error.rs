//! Error taxonomy for the conversion pipeline.
//!
//! Errors fall into two families: [`CommandError`] is caused by what the user
//! typed and is answered with an addressed reply, [`QuoteError`] is caused by
//! deployment configuration or the quote server and is reported as a plain
//! chat message.

use thiserror::Error;

/// Coarse classification used by the handler to pick a reply style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UserInput,
    ConfigIncomplete,
    ServerError,
}

impl ErrorKind {
    /// User-caused errors are answered as addressed replies.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, ErrorKind::UserInput)
    }
}

/// Validation failures for a conversion command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("wrong number of parameters, expected `<quote> <base> <amount>`")]
    WrongArity { found: usize },

    #[error("currency is not available for conversion: {0}")]
    UnknownCurrency(String),

    #[error("cannot convert identical currencies: {quote} - {base}")]
    SameCurrency { quote: String, base: String },

    #[error("invalid amount to convert: {0}")]
    InvalidAmount(String),
}

impl CommandError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::UserInput
    }
}

/// Failures while fetching a quote.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// A required quote API setting is unset or empty.
    #[error("quote API settings are incomplete, missing: {}", .missing.join(", "))]
    ConfigIncomplete { missing: Vec<&'static str> },

    #[error("failed to fetch quote from server: {0}")]
    Transport(String),

    #[error("failed to fetch quote from server: HTTP status: {status}, response: {body}")]
    Status { status: u16, body: String },

    #[error("failed to fetch quote from server: malformed response: {0}")]
    InvalidResponse(String),

    #[error("failed to fetch quote from server: parameter \"{0}\" is missing in server response")]
    MissingField(String),
}

impl QuoteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuoteError::ConfigIncomplete { .. } => ErrorKind::ConfigIncomplete,
            _ => ErrorKind::ServerError,
        }
    }
}

/// Any failure of a single conversion request.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Quote(#[from] QuoteError),
}

impl ConversionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::Command(e) => e.kind(),
            ConversionError::Quote(e) => e.kind(),
        }
    }
}
