//! Gamma wire types and the decode boundary into typed market records

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Market object as returned by `GET /markets`.
///
/// Only the fields the collector relies on are modelled. `outcomes` and
/// `clobTokenIds` arrive either as JSON arrays or as JSON-encoded strings,
/// so they stay raw until [`MarketRecord::try_from`] validates them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcomes: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clob_token_ids: Option<Value>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketDecodeError {
    #[error("{field}: encoded list is not valid JSON: {reason}")]
    InvalidEncoding { field: &'static str, reason: String },

    #[error("{field}: expected a list, got {found}")]
    NotAList { field: &'static str, found: &'static str },

    #[error("{field}[{index}]: expected a string or number, got {found}")]
    InvalidElement {
        field: &'static str,
        index: usize,
        found: &'static str,
    },
}

/// Fully validated market, ready to be expanded into instrument targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketRecord {
    pub id: Option<String>,
    /// Trimmed slug, `None` when missing or blank
    pub slug: Option<String>,
    pub question: String,
    pub active: bool,
    pub closed: bool,
    pub token_ids: Vec<String>,
    pub outcomes: Vec<String>,
}

impl MarketRecord {
    /// Market group identifier: the slug, or `market-{id}` without one
    pub fn group_id(&self) -> String {
        match &self.slug {
            Some(slug) => slug.clone(),
            None => format!("market-{}", self.id.as_deref().unwrap_or("unknown")),
        }
    }

    /// Live in the rolling sense: has a slug, is active and not closed
    pub fn is_live(&self) -> bool {
        self.slug.is_some() && self.active && !self.closed
    }

    /// Case-insensitive substring match on question and slug.
    /// An empty keyword matches everything.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        if keyword.is_empty() {
            return true;
        }
        let keyword = keyword.to_lowercase();
        let haystack = format!(
            "{} {}",
            self.question,
            self.slug.as_deref().unwrap_or_default()
        )
        .to_lowercase();
        haystack.contains(&keyword)
    }
}

impl TryFrom<&Market> for MarketRecord {
    type Error = MarketDecodeError;

    fn try_from(market: &Market) -> Result<Self, Self::Error> {
        let token_ids = decode_string_list("clobTokenIds", market.clob_token_ids.as_ref())?;
        let outcomes = decode_string_list("outcomes", market.outcomes.as_ref())?;

        Ok(Self {
            id: market.id.as_ref().and_then(scalar_to_string),
            slug: market
                .slug
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            question: market.question.clone().unwrap_or_default(),
            active: market.active == Some(true),
            closed: market.closed == Some(true),
            token_ids,
            outcomes,
        })
    }
}

/// Decode a list field that may be a native array or a JSON-encoded string
fn decode_string_list(
    field: &'static str,
    value: Option<&Value>,
) -> Result<Vec<String>, MarketDecodeError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => decode_items(field, items),
        Some(Value::String(encoded)) => {
            if encoded.trim().is_empty() {
                return Ok(Vec::new());
            }
            let decoded: Value = serde_json::from_str(encoded).map_err(|e| {
                MarketDecodeError::InvalidEncoding {
                    field,
                    reason: e.to_string(),
                }
            })?;
            match decoded {
                Value::Array(items) => decode_items(field, &items),
                other => Err(MarketDecodeError::NotAList {
                    field,
                    found: kind(&other),
                }),
            }
        }
        Some(other) => Err(MarketDecodeError::NotAList {
            field,
            found: kind(other),
        }),
    }
}

fn decode_items(field: &'static str, items: &[Value]) -> Result<Vec<String>, MarketDecodeError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            scalar_to_string(item).ok_or(MarketDecodeError::InvalidElement {
                field,
                index,
                found: kind(item),
            })
        })
        .collect()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Query filters for `GET /markets`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GammaFilters {
    pub active: Option<bool>,
    pub closed: Option<bool>,
    pub slug: Option<String>,
    pub limit: Option<usize>,
}

impl GammaFilters {
    /// Broad listing of open markets
    pub fn open_markets(limit: usize) -> Self {
        Self {
            active: Some(true),
            closed: Some(false),
            limit: Some(limit),
            ..Default::default()
        }
    }

    /// Lookup of a single slug
    pub fn by_slug(slug: impl Into<String>, limit: usize) -> Self {
        Self {
            slug: Some(slug.into()),
            limit: Some(limit),
            ..Default::default()
        }
    }

    /// Build query parameters for HTTP request
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(active) = self.active {
            params.push(("active".to_string(), active.to_string()));
        }

        if let Some(closed) = self.closed {
            params.push(("closed".to_string(), closed.to_string()));
        }

        if let Some(slug) = &self.slug {
            params.push(("slug".to_string(), slug.clone()));
        }

        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }
}
