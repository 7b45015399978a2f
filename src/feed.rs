//! Rate-offer sources consumed by the recommendation engine.
//!
//! Fetching is fallible, ranking is not: `load_quotes` is the boundary where a
//! failed source turns into an empty feed.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::RateQuote;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read rate feed {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed rate feed {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub trait RateFeed: Send + Sync {
    fn fetch(&self) -> Result<Vec<RateQuote>, FeedError>;
}

/// Quotes already held in memory (command-line flags, request payloads).
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    quotes: Vec<RateQuote>,
}

impl StaticFeed {
    pub fn new(quotes: Vec<RateQuote>) -> Self {
        Self { quotes }
    }
}

impl RateFeed for StaticFeed {
    fn fetch(&self) -> Result<Vec<RateQuote>, FeedError> {
        Ok(self.quotes.clone())
    }
}

/// JSON array of `{"name": ..., "rate": ...}` objects on disk.
#[derive(Debug, Clone)]
pub struct JsonFileFeed {
    path: PathBuf,
}

impl JsonFileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RateFeed for JsonFileFeed {
    fn fetch(&self) -> Result<Vec<RateQuote>, FeedError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| FeedError::Io {
            path: self.path.clone(),
            source,
        })?;
        let entries: Vec<Value> = serde_json::from_str(&raw).map_err(|source| FeedError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(quotes_from_values(entries))
    }
}

/// Decodes feed entries one at a time; entries that are not `{name, rate}`
/// objects (null rate, missing field, non-string name) are dropped on their own.
pub fn quotes_from_values(entries: Vec<Value>) -> Vec<RateQuote> {
    entries
        .into_iter()
        .filter_map(|entry| match RateQuote::deserialize(&entry) {
            Ok(quote) => Some(quote),
            Err(err) => {
                tracing::debug!(%entry, error = %err, "dropping malformed rate quote");
                None
            }
        })
        .collect()
}

/// Fetches from `feed`, degrading any failure to an empty list.
pub fn load_quotes(feed: &dyn RateFeed) -> Vec<RateQuote> {
    match feed.fetch() {
        Ok(quotes) => {
            if quotes.is_empty() {
                tracing::warn!("rate feed returned no quotes");
            } else {
                tracing::debug!(count = quotes.len(), "loaded rate quotes");
            }
            quotes
        }
        Err(err) => {
            tracing::warn!(error = %err, "rate feed unavailable, continuing without quotes");
            Vec::new()
        }
    }
}
