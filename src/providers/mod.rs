pub mod quote_api;

pub use quote_api::QuoteClient;
