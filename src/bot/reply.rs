//! Transport-neutral message and reply types.

use anyhow::Result;
use async_trait::async_trait;

/// A text message received from a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub chat_id: i64,
    pub message_id: i32,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTarget {
    /// Linked to the message with this id.
    Addressed(i32),
    /// Sent to the chat without referencing any message.
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub chat_id: i64,
    pub target: ReplyTarget,
    pub text: String,
}

impl Reply {
    pub fn addressed(msg: &IncomingMessage, text: impl Into<String>) -> Self {
        Reply {
            chat_id: msg.chat_id,
            target: ReplyTarget::Addressed(msg.message_id),
            text: text.into(),
        }
    }

    pub fn plain(chat_id: i64, text: impl Into<String>) -> Self {
        Reply {
            chat_id,
            target: ReplyTarget::Plain,
            text: text.into(),
        }
    }

    pub fn is_addressed(&self) -> bool {
        matches!(self.target, ReplyTarget::Addressed(_))
    }
}

/// Delivers replies to wherever the messages came from.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn deliver(&self, reply: Reply) -> Result<()>;
}

/// Prints replies, used by the one-shot CLI commands.
pub struct StdoutSink;

#[async_trait]
impl ReplySink for StdoutSink {
    async fn deliver(&self, reply: Reply) -> Result<()> {
        if reply.is_addressed() {
            println!("> {}", reply.text);
        } else {
            println!("{}", reply.text);
        }
        Ok(())
    }
}
