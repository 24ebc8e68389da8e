//! Parsing of free-text conversion commands.
//!
//! A command has the form `<quote> <base> <amount>` where both currencies are
//! names from the [`CurrencyTable`] and the amount is a positive whole number.

use crate::core::currency::CurrencyTable;
use crate::core::error::CommandError;
use std::sync::Arc;
use tracing::debug;

/// A validated conversion request.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// Name the user typed for the source currency.
    pub quote_name: String,
    /// Name the user typed for the target currency.
    pub base_name: String,
    pub quote_symbol: String,
    pub base_symbol: String,
    pub amount: f64,
}

impl Command {
    /// The `(quote symbol, base symbol, amount)` triple sent to the quote API.
    pub fn params(&self) -> (&str, &str, f64) {
        (&self.quote_symbol, &self.base_symbol, self.amount)
    }
}

#[derive(Debug, Clone)]
pub struct CommandParser {
    currencies: Arc<CurrencyTable>,
}

impl CommandParser {
    pub fn new(currencies: Arc<CurrencyTable>) -> Self {
        Self { currencies }
    }

    /// Validates `raw` and resolves both currency names to provider symbols.
    ///
    /// Checks run in a fixed order and the first failing rule is reported:
    /// token count, quote name, base name, distinct names, then amount.
    pub fn get_params(&self, raw: &str) -> Result<Command, CommandError> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        let [quote_name, base_name, amount_text] = tokens.as_slice() else {
            return Err(CommandError::WrongArity {
                found: tokens.len(),
            });
        };

        let quote_symbol = self
            .currencies
            .symbol(quote_name)
            .ok_or_else(|| CommandError::UnknownCurrency(quote_name.to_string()))?;
        let base_symbol = self
            .currencies
            .symbol(base_name)
            .ok_or_else(|| CommandError::UnknownCurrency(base_name.to_string()))?;

        if quote_name == base_name {
            return Err(CommandError::SameCurrency {
                quote: quote_name.to_string(),
                base: base_name.to_string(),
            });
        }

        let amount = parse_amount(amount_text)
            .ok_or_else(|| CommandError::InvalidAmount(amount_text.to_string()))?;

        debug!(quote = %quote_symbol, base = %base_symbol, amount, "Parsed conversion command");
        Ok(Command {
            quote_name: quote_name.to_string(),
            base_name: base_name.to_string(),
            quote_symbol: quote_symbol.to_string(),
            base_symbol: base_symbol.to_string(),
            amount,
        })
    }
}

/// Only plain digit strings are accepted, so signs, decimal points and
/// separators are all rejected. The value must also be strictly positive.
fn parse_amount(text: &str) -> Option<f64> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let amount: f64 = text.parse().ok()?;
    (amount.is_finite() && amount > 0.0).then_some(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> CommandParser {
        CommandParser::new(Arc::new(CurrencyTable::new([
            ("BTC", "BTC"),
            ("USD", "USD"),
            ("euro", "EUR"),
        ])))
    }

    #[test]
    fn test_valid_command() {
        let cmd = parser().get_params("BTC euro 100").unwrap();
        assert_eq!(cmd.params(), ("BTC", "EUR", 100.0));
        assert_eq!(cmd.quote_name, "BTC");
        assert_eq!(cmd.base_name, "euro");
    }

    #[test]
    fn test_extra_whitespace_is_tolerated() {
        let cmd = parser().get_params("  BTC    USD \t 7  ").unwrap();
        assert_eq!(cmd.params(), ("BTC", "USD", 7.0));
    }

    #[test]
    fn test_wrong_number_of_parameters() {
        for raw in ["", "   ", "BTC", "BTC USD", "BTC USD 1 2", "a b c d e"] {
            let err = parser().get_params(raw).unwrap_err();
            assert!(
                matches!(err, CommandError::WrongArity { .. }),
                "unexpected error for {raw:?}: {err:?}"
            );
            assert!(err.to_string().contains("wrong number of parameters"));
        }
    }

    #[test]
    fn test_unknown_currencies() {
        let err = parser().get_params("DOGE USD 1").unwrap_err();
        assert_eq!(err, CommandError::UnknownCurrency("DOGE".to_string()));

        let err = parser().get_params("BTC DOGE 1").unwrap_err();
        assert_eq!(err, CommandError::UnknownCurrency("DOGE".to_string()));

        // Symbols are not names
        let err = parser().get_params("BTC EUR 1").unwrap_err();
        assert_eq!(err, CommandError::UnknownCurrency("EUR".to_string()));
    }

    #[test]
    fn test_quote_is_checked_before_base() {
        let err = parser().get_params("foo bar 1").unwrap_err();
        assert_eq!(err, CommandError::UnknownCurrency("foo".to_string()));
    }

    #[test]
    fn test_identical_currencies() {
        let err = parser().get_params("BTC BTC 10").unwrap_err();
        assert_eq!(
            err,
            CommandError::SameCurrency {
                quote: "BTC".to_string(),
                base: "BTC".to_string()
            }
        );
    }

    #[test]
    fn test_identical_currencies_checked_before_amount() {
        let err = parser().get_params("USD USD abc").unwrap_err();
        assert!(matches!(err, CommandError::SameCurrency { .. }));
    }

    #[test]
    fn test_invalid_amounts() {
        for amount in ["1.5", "-1", "+1", "0", "000", "1,000", "1e3", "abc", "½", "１"] {
            let err = parser()
                .get_params(&format!("BTC USD {amount}"))
                .unwrap_err();
            assert_eq!(err, CommandError::InvalidAmount(amount.to_string()));
        }
    }

    #[test]
    fn test_leading_zeros_are_accepted() {
        let cmd = parser().get_params("BTC USD 0010").unwrap();
        assert_eq!(cmd.amount, 10.0);
    }
}
