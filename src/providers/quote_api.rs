use crate::core::config::QuoteApiConfig;
use crate::core::error::QuoteError;
use crate::core::quote::QuoteProvider;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// HTTP client for a `?from=<quote>&to=<base>` style price endpoint that
/// answers with a JSON object of symbol to rate, e.g. `{"USD": 65000.0}`.
pub struct QuoteClient {
    config: QuoteApiConfig,
    client: reqwest::Client,
}

impl QuoteClient {
    /// The configuration is not checked here; see [`QuoteClient::endpoint`].
    pub fn new(config: QuoteApiConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("quotebot/1.0")
            .build()?;
        Ok(QuoteClient { config, client })
    }

    /// Builds the request URL, failing if any required setting is absent.
    /// Runs on every request, settings are never assumed valid.
    fn endpoint(&self, quote: &str, base: &str) -> Result<Url, QuoteError> {
        let missing = self.config.missing_fields();
        if !missing.is_empty() {
            return Err(QuoteError::ConfigIncomplete { missing });
        }

        let setting = |value: &Option<String>| value.clone().unwrap_or_default();
        let base_url = format!(
            "{}{}",
            setting(&self.config.host),
            setting(&self.config.api_path)
        );
        let params = [
            (setting(&self.config.from_param), quote),
            (setting(&self.config.to_param), base),
        ];

        Url::parse_with_params(&base_url, params)
            .map_err(|e| QuoteError::Transport(format!("invalid quote API URL {base_url}: {e}")))
    }
}

/// Reads a rate given either as a JSON number or as a numeric string.
fn parse_rate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|rate| rate.is_finite()),
        _ => None,
    }
}

#[async_trait]
impl QuoteProvider for QuoteClient {
    #[instrument(name = "QuoteFetch", skip(self), fields(quote = %quote, base = %base))]
    async fn get_price(&self, quote: &str, base: &str, amount: f64) -> Result<f64, QuoteError> {
        let url = self.endpoint(quote, base)?;
        debug!("Requesting quote from {}", url);

        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(self.config.timeout))
            .send()
            .await
            .map_err(|e| QuoteError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| QuoteError::Transport(e.to_string()))?;

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), body = %text, "Quote server returned an error");
            return Err(QuoteError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let data: Map<String, Value> = serde_json::from_str(&text).map_err(|e| {
            warn!(error = ?e, response = %text, "Failed to parse quote response");
            QuoteError::InvalidResponse(format!("{e}: {text}"))
        })?;

        let value = data
            .get(base)
            .ok_or_else(|| QuoteError::MissingField(base.to_string()))?;
        let rate = parse_rate(value).ok_or_else(|| {
            QuoteError::InvalidResponse(format!("rate for \"{base}\" is not a number: {value}"))
        })?;

        debug!(rate, amount, "Received quote");
        Ok(amount * rate)
    }
}
