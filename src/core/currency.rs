//! Currency name table

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maps the currency names users type to the symbols the quote API expects.
///
/// Loaded once from configuration and never mutated afterwards, so it is
/// shared between concurrently handled messages behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyTable {
    entries: BTreeMap<String, String>,
}

impl CurrencyTable {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, symbol)| (name.into(), symbol.into()))
                .collect(),
        }
    }

    /// Provider symbol for a user-facing name.
    pub fn symbol(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Currency names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
