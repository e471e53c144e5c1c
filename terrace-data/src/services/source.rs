//! External players source: wire types and the fetch seam
//!
//! The provider returns loosely-typed JSON (ids and ages show up as
//! numbers or strings depending on the record), so every inbound field
//! is optional and numeric fields go through [`LooseInt`]. Strictness
//! is applied later by the normalizer, not at the deserialization
//! boundary.

use crate::models::{ImportParameters, LooseInt};
use async_trait::async_trait;
use serde::Deserialize;

/// One entry of the provider's `response` array
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlayerEntry {
    #[serde(default)]
    pub player: RawPlayer,
    #[serde(default)]
    pub statistics: Vec<RawStatistics>,
}

/// Player block of a response entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlayer {
    #[serde(default)]
    pub id: Option<LooseInt>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub age: Option<LooseInt>,
    #[serde(default)]
    pub birth: Option<RawBirth>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBirth {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Per-team statistics block of a response entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStatistics {
    #[serde(default)]
    pub team: Option<RawTeamRef>,
    #[serde(default)]
    pub league: Option<RawLeagueRef>,
    #[serde(default)]
    pub games: Option<RawGames>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTeamRef {
    #[serde(default)]
    pub id: Option<LooseInt>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLeagueRef {
    #[serde(default)]
    pub id: Option<LooseInt>,
    #[serde(default)]
    pub season: Option<LooseInt>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGames {
    #[serde(default)]
    pub position: Option<String>,
}

/// Pagination block of the provider envelope
#[derive(Debug, Clone, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub current: i64,
    #[serde(default)]
    pub total: i64,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            current: 1,
            total: 1,
        }
    }
}

/// One page of the provider's players endpoint
///
/// The provider reports request problems inside the `errors` field of
/// an HTTP 200 response, so callers must check [`provider_error`]
/// before trusting `response`.
///
/// [`provider_error`]: PlayersPage::provider_error
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayersPage {
    #[serde(default)]
    pub response: Vec<RawPlayerEntry>,
    #[serde(default)]
    pub paging: Paging,
    #[serde(default)]
    pub errors: serde_json::Value,
}

impl PlayersPage {
    /// Error text from the envelope, if the provider reported any
    ///
    /// The `errors` field is `[]` on success but becomes an object
    /// (or occasionally a non-empty array) when the provider rejects
    /// the request.
    pub fn provider_error(&self) -> Option<String> {
        match &self.errors {
            serde_json::Value::Object(map) if !map.is_empty() => {
                let joined = map
                    .iter()
                    .map(|(key, value)| match value.as_str() {
                        Some(text) => format!("{}: {}", key, text),
                        None => format!("{}: {}", key, value),
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
                Some(joined)
            }
            serde_json::Value::Array(items) if !items.is_empty() => {
                let joined = items
                    .iter()
                    .map(|value| match value.as_str() {
                        Some(text) => text.to_string(),
                        None => value.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
                Some(joined)
            }
            _ => None,
        }
    }
}

/// Errors from the external players source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Provider request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SourceError::Timeout
        } else {
            SourceError::Network(e.to_string())
        }
    }
}

/// Anything that can produce a page of players for import
///
/// The production implementation talks to API-Football; tests swap in
/// scripted sources.
#[async_trait]
pub trait PlayersSource: Send + Sync {
    async fn fetch_page(&self, params: &ImportParameters) -> Result<PlayersPage, SourceError>;
}
