use crate::bot::reply::{IncomingMessage, Reply, ReplySink};
use crate::core::config::AppConfig;
use crate::core::error::ConversionError;
use crate::core::quote::format_number;
use crate::core::{CommandParser, CurrencyTable, QuoteProvider};
use crate::providers::QuoteClient;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const HELP_TEXT: &str = "Send the bot a command in the format:\n\
    <currency> <currency to convert into> <amount>\n\
    The /values command lists the available currencies.";

/// Prefix of replies caused by malformed commands.
pub const USER_ERROR_PREFIX: &str = "User error";
/// Prefix of replies caused by configuration or quote server failures.
pub const SYSTEM_ERROR_PREFIX: &str = "Failed to process command";

/// Turns each incoming message into exactly one reply.
///
/// Holds only read-only state, so one instance serves every chat.
pub struct ConversionHandler {
    currencies: Arc<CurrencyTable>,
    parser: CommandParser,
    quotes: Arc<dyn QuoteProvider>,
}

impl ConversionHandler {
    pub fn new(currencies: Arc<CurrencyTable>, quotes: Arc<dyn QuoteProvider>) -> Self {
        ConversionHandler {
            parser: CommandParser::new(Arc::clone(&currencies)),
            currencies,
            quotes,
        }
    }

    /// Wires the HTTP quote client from configuration. Incomplete API
    /// settings are not an error here, they are reported per request.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let currencies = Arc::new(config.currencies.clone());
        if currencies.is_empty() {
            warn!("No currencies configured, every conversion will be rejected");
        }
        let client = QuoteClient::new(config.quote_api.clone())?;
        Ok(Self::new(currencies, Arc::new(client)))
    }

    pub fn help(&self, msg: &IncomingMessage) -> Reply {
        Reply::plain(msg.chat_id, HELP_TEXT)
    }

    pub fn values(&self, msg: &IncomingMessage) -> Reply {
        Reply::plain(msg.chat_id, self.currencies_text())
    }

    pub fn currencies_text(&self) -> String {
        let names: Vec<&str> = self.currencies.names().collect();
        format!("Available currencies:\n - {}", names.join("\n - "))
    }

    /// Parses and quotes a conversion command.
    ///
    /// User mistakes become an addressed reply to `msg`, everything else a
    /// plain message to the chat.
    pub async fn convert(&self, msg: &IncomingMessage) -> Reply {
        match self.quote(&msg.text).await {
            Ok(text) => Reply::plain(msg.chat_id, text),
            Err(e) if e.kind().is_user_facing() => {
                debug!(error = %e, text = %msg.text, "Rejected conversion command");
                Reply::addressed(msg, format!("{USER_ERROR_PREFIX}: \"{e}\""))
            }
            Err(e) => {
                warn!(error = %e, kind = ?e.kind(), "Conversion failed");
                Reply::plain(msg.chat_id, format!("{SYSTEM_ERROR_PREFIX}: \"{e}\""))
            }
        }
    }

    async fn quote(&self, text: &str) -> Result<String, ConversionError> {
        let command = self.parser.get_params(text)?;
        let (quote, base, amount) = command.params();
        let result = self.quotes.get_price(quote, base, amount).await?;
        info!(quote, base, amount, result, "Converted");

        Ok(format!(
            "Price of {} {} in {} - {}",
            format_number(command.amount),
            command.quote_name,
            command.base_name,
            format_number(result)
        ))
    }

    /// Runs a conversion and hands the single reply to `sink`.
    pub async fn handle(&self, msg: &IncomingMessage, sink: &dyn ReplySink) -> Result<()> {
        let reply = self.convert(msg).await;
        sink.deliver(reply).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::reply::ReplyTarget;
    use crate::core::QuoteError;
    use async_trait::async_trait;

    struct FixedRate(f64);

    #[async_trait]
    impl QuoteProvider for FixedRate {
        async fn get_price(&self, _quote: &str, _base: &str, amount: f64) -> Result<f64, QuoteError> {
            Ok(amount * self.0)
        }
    }

    struct Unreachable;

    #[async_trait]
    impl QuoteProvider for Unreachable {
        async fn get_price(&self, _quote: &str, _base: &str, _amount: f64) -> Result<f64, QuoteError> {
            Err(QuoteError::Transport("connection refused".to_string()))
        }
    }

    fn handler(quotes: Arc<dyn QuoteProvider>) -> ConversionHandler {
        let currencies = Arc::new(CurrencyTable::new([
            ("bitcoin", "BTC"),
            ("dollar", "USD"),
            ("euro", "EUR"),
        ]));
        ConversionHandler::new(currencies, quotes)
    }

    fn message(text: &str) -> IncomingMessage {
        IncomingMessage {
            chat_id: 42,
            message_id: 7,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_successful_conversion_is_plain_message() {
        let reply = handler(Arc::new(FixedRate(65000.0)))
            .convert(&message("bitcoin dollar 10"))
            .await;

        assert_eq!(reply.chat_id, 42);
        assert_eq!(reply.target, ReplyTarget::Plain);
        assert_eq!(reply.text, "Price of 10.0 bitcoin in dollar - 650000.0");
    }

    #[tokio::test]
    async fn test_user_error_is_addressed_reply() {
        let reply = handler(Arc::new(FixedRate(1.0)))
            .convert(&message("bitcoin bitcoin 10"))
            .await;

        assert_eq!(reply.target, ReplyTarget::Addressed(7));
        assert!(reply.text.starts_with(USER_ERROR_PREFIX));
        assert!(reply.text.contains("bitcoin - bitcoin"));
    }

    #[tokio::test]
    async fn test_user_error_skips_quote_provider() {
        // Unreachable would turn the reply into a system error if called
        let reply = handler(Arc::new(Unreachable))
            .convert(&message("bitcoin dollar 1.5"))
            .await;

        assert!(reply.is_addressed());
        assert!(reply.text.contains("invalid amount to convert: 1.5"));
    }

    #[tokio::test]
    async fn test_server_error_is_plain_message() {
        let reply = handler(Arc::new(Unreachable))
            .convert(&message("bitcoin dollar 1"))
            .await;

        assert_eq!(reply.target, ReplyTarget::Plain);
        assert!(reply.text.starts_with(SYSTEM_ERROR_PREFIX));
        assert!(reply.text.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_incomplete_config_is_plain_message() {
        let config = AppConfig::from_yaml("currencies:\n  bitcoin: BTC\n  dollar: USD\n").unwrap();
        let handler = ConversionHandler::from_config(&config).unwrap();

        let reply = handler.convert(&message("bitcoin dollar 1")).await;
        assert_eq!(reply.target, ReplyTarget::Plain);
        assert!(reply.text.starts_with(SYSTEM_ERROR_PREFIX));
        assert!(reply.text.contains("host"));
    }

    #[tokio::test]
    async fn test_failure_does_not_affect_next_message() {
        let handler = handler(Arc::new(FixedRate(2.0)));

        let first = handler.convert(&message("bitcoin")).await;
        assert!(first.is_addressed());

        let second = handler.convert(&message("euro dollar 3")).await;
        assert_eq!(second.text, "Price of 3.0 euro in dollar - 6.0");
    }

    #[test]
    fn test_currency_listing() {
        let handler = handler(Arc::new(FixedRate(1.0)));
        let reply = handler.values(&message("/values"));

        assert_eq!(reply.target, ReplyTarget::Plain);
        assert_eq!(
            reply.text,
            "Available currencies:\n - bitcoin\n - dollar\n - euro"
        );
    }

    #[test]
    fn test_help() {
        let handler = handler(Arc::new(FixedRate(1.0)));
        let reply = handler.help(&message("/help"));
        assert_eq!(reply.text, HELP_TEXT);
        assert!(reply.text.contains("/values"));
    }
}
