//! Quote abstractions

use crate::core::error::QuoteError;
use async_trait::async_trait;

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Converts `amount` units of `quote` into `base` at the current rate.
    async fn get_price(&self, quote: &str, base: &str, amount: f64) -> Result<f64, QuoteError>;
}

/// Renders a number the way replies show it: integral values keep a trailing
/// `.0` (`650000.0`), everything else uses the shortest exact form. Very large
/// or small magnitudes switch to exponent form without a sign (`1e16`).
pub fn format_number(value: f64) -> String {
    format!("{value:?}")
}
