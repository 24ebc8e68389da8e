pub mod bot;
pub mod cli;
pub mod core;
pub mod providers;

use crate::bot::{ConversionHandler, IncomingMessage, ReplySink, StdoutSink};
use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

// Chat id used for replies produced outside of any chat
const LOCAL_CHAT_ID: i64 = 0;

pub enum AppCommand {
    /// Serve conversions over Telegram
    Run,
    /// Run a single conversion command
    Convert(String),
    /// List available currencies
    Values,
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Quote bot starting...");
    let config = load_config(config_path)?;
    execute(command, &config, &StdoutSink).await
}

/// Runs `command` against an already loaded configuration. One-shot commands
/// deliver their single reply to `sink`.
pub async fn execute(command: AppCommand, config: &AppConfig, sink: &dyn ReplySink) -> Result<()> {
    let handler = ConversionHandler::from_config(config)?;

    match command {
        AppCommand::Run => {
            let token = config
                .bot_token()
                .context("Bot token is not configured, set `bot.token` in the config file")?;
            bot::telegram::run(token, Arc::new(handler)).await
        }
        AppCommand::Convert(text) => {
            let msg = IncomingMessage {
                chat_id: LOCAL_CHAT_ID,
                message_id: 0,
                text,
            };
            handler.handle(&msg, sink).await
        }
        AppCommand::Values => {
            let msg = IncomingMessage {
                chat_id: LOCAL_CHAT_ID,
                message_id: 0,
                text: String::new(),
            };
            sink.deliver(handler.values(&msg)).await
        }
    }
}
