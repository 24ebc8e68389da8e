//! Telegram transport built on teloxide long polling.

use crate::bot::handler::ConversionHandler;
use crate::bot::reply::{IncomingMessage, Reply, ReplySink, ReplyTarget};
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{MessageId, ReplyParameters};
use teloxide::utils::command::BotCommands;
use tracing::{debug, info, warn};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum ChatCommand {
    #[command(description = "show usage")]
    Start,
    #[command(description = "show usage")]
    Help,
    #[command(description = "list available currencies")]
    Values,
}

pub struct TelegramSink {
    bot: Bot,
}

impl TelegramSink {
    pub fn new(bot: Bot) -> Self {
        TelegramSink { bot }
    }
}

#[async_trait]
impl ReplySink for TelegramSink {
    async fn deliver(&self, reply: Reply) -> anyhow::Result<()> {
        let request = self.bot.send_message(ChatId(reply.chat_id), reply.text);
        match reply.target {
            ReplyTarget::Addressed(id) => {
                request
                    .reply_parameters(ReplyParameters::new(MessageId(id)))
                    .await?
            }
            ReplyTarget::Plain => request.await?,
        };
        Ok(())
    }
}

fn incoming(msg: &Message) -> Option<IncomingMessage> {
    Some(IncomingMessage {
        chat_id: msg.chat.id.0,
        message_id: msg.id.0,
        text: msg.text()?.to_string(),
    })
}

async fn on_command(
    bot: Bot,
    msg: Message,
    cmd: ChatCommand,
    handler: Arc<ConversionHandler>,
) -> HandlerResult {
    let Some(incoming) = incoming(&msg) else {
        return Ok(());
    };
    debug!(?cmd, chat_id = incoming.chat_id, "Received command");

    let reply = match cmd {
        ChatCommand::Start | ChatCommand::Help => handler.help(&incoming),
        ChatCommand::Values => handler.values(&incoming),
    };
    TelegramSink::new(bot).deliver(reply).await?;
    Ok(())
}

async fn on_text(bot: Bot, msg: IncomingMessage, handler: Arc<ConversionHandler>) -> HandlerResult {
    debug!(chat_id = msg.chat_id, text = %msg.text, "Received conversion request");
    handler.handle(&msg, &TelegramSink::new(bot)).await?;
    Ok(())
}

/// Polls Telegram for updates until interrupted with Ctrl-C.
pub async fn run(token: &str, handler: Arc<ConversionHandler>) -> anyhow::Result<()> {
    let bot = Bot::new(token);

    if let Err(e) = bot.set_my_commands(ChatCommand::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let schema = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<ChatCommand>()
                .endpoint(on_command),
        )
        .branch(dptree::filter_map(|msg: Message| incoming(&msg)).endpoint(on_text));

    info!("Bot is polling for updates");
    Dispatcher::builder(bot, schema)
        .dependencies(dptree::deps![handler])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Bot stopped");
    Ok(())
}
