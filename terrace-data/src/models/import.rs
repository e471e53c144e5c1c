//! Import request parameters, the shared lenient integer type, and
//! the result summary

use serde::{Deserialize, Serialize};

/// An integer that may arrive as a JSON number, float, or string
///
/// Shared by the inbound import query and the provider wire structs,
/// so every lenient integer in the system follows one coercion rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LooseInt {
    Int(i64),
    Float(f64),
    Text(String),
}

impl LooseInt {
    /// Integer value, if the payload represents one exactly
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            LooseInt::Int(n) => Some(*n),
            LooseInt::Float(f) => (f.is_finite() && f.fract() == 0.0).then(|| *f as i64),
            LooseInt::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }

    /// Integer value, restricted to positive identifiers
    pub fn as_positive(&self) -> Option<i64> {
        self.as_i64().filter(|n| *n > 0)
    }
}

/// Raw import request body, before validation
///
/// Fields arrive as free-form JSON so that a client sending `"2021"`
/// or `2021.0` is still accepted, while a bad value produces a report
/// naming the offending field instead of a generic deserialization
/// failure.
#[derive(Debug, Default, Deserialize)]
pub struct RawImportQuery {
    #[serde(default)]
    pub season: Option<serde_json::Value>,
    #[serde(default)]
    pub league: Option<serde_json::Value>,
    #[serde(default)]
    pub team: Option<serde_json::Value>,
    #[serde(default)]
    pub page: Option<serde_json::Value>,
}

/// A required parameter was missing or not a positive integer
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid or missing parameter: {field}")]
pub struct InvalidParameter {
    pub field: &'static str,
}

/// Validated parameters for one import request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportParameters {
    pub season: i64,
    pub league: i64,
    pub team: i64,
    pub page: i64,
}

impl RawImportQuery {
    /// Validate the raw query, reporting the first offending field
    ///
    /// `season`, `league` and `team` must be positive integers, given
    /// as JSON numbers or numeric strings. `page` is optional and
    /// defaults to 1. Fields are checked in declaration order so the
    /// error always names the first problem.
    pub fn validate(&self) -> Result<ImportParameters, InvalidParameter> {
        let season = require_positive(&self.season, "season")?;
        let league = require_positive(&self.league, "league")?;
        let team = require_positive(&self.team, "team")?;
        let page = match &self.page {
            None | Some(serde_json::Value::Null) => 1,
            given => require_positive(given, "page")?,
        };

        Ok(ImportParameters {
            season,
            league,
            team,
            page,
        })
    }
}

fn require_positive(
    value: &Option<serde_json::Value>,
    field: &'static str,
) -> Result<i64, InvalidParameter> {
    value
        .as_ref()
        .and_then(positive_int)
        .ok_or(InvalidParameter { field })
}

/// Coerce a JSON value to a positive integer, if possible
///
/// Delegates to [`LooseInt`]; the fields themselves stay
/// `serde_json::Value` so a wrongly-typed value reaches validation
/// (and gets named) instead of failing body deserialization.
fn positive_int(value: &serde_json::Value) -> Option<i64> {
    serde_json::from_value::<LooseInt>(value.clone())
        .ok()?
        .as_positive()
}

/// One membership failure recorded during reconciliation
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MembershipError {
    pub player_id: i64,
    pub reason: String,
}

/// Result of importing one page of players
#[derive(Debug, Serialize)]
pub struct ImportSummary {
    /// Number of player records written to the database
    pub imported: usize,
    /// Number of squad memberships satisfied (created or already present)
    pub memberships_inserted: usize,
    /// Per-player membership failures; never fails the import itself
    pub membership_errors: Vec<MembershipError>,
    pub season: i64,
    pub league: i64,
    pub team: i64,
    pub page: i64,
    /// Total pages reported by the provider for these parameters
    pub total_pages: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ImportSummary {
    /// Summary for a page that yielded no importable players
    pub fn empty(params: &ImportParameters, total_pages: i64) -> Self {
        Self {
            imported: 0,
            memberships_inserted: 0,
            membership_errors: Vec::new(),
            season: params.season,
            league: params.league,
            team: params.team,
            page: params.page,
            total_pages,
            message: Some("No players found".to_string()),
        }
    }
}
