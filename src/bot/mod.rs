//! Chat-facing side of the bot: the conversion handler and its transports.

pub mod handler;
pub mod reply;
pub mod telegram;

pub use handler::ConversionHandler;
pub use reply::{IncomingMessage, Reply, ReplySink, ReplyTarget, StdoutSink};
