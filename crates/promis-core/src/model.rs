//! Item response records and `ITEM=CHOICE` pair parsing.
//!
//! The stateless endpoint accepts an ordered list of item responses. On
//! the wire these use the Assessment Center's PascalCase field names;
//! the CLI collects them as repeated `--response ITEM=CHOICE` flags.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single answered item, as submitted to the stateless endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResponse {
    /// Item identifier (e.g. "PAININ9").
    #[serde(rename = "ItemID")]
    pub item_id: String,
    /// The chosen response option.
    #[serde(rename = "ItemResponseOID")]
    pub item_response_oid: String,
    /// 1-based position in the response sequence.
    #[serde(rename = "Order")]
    pub order: u32,
}

/// Error produced when an `ITEM=CHOICE` pair cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponsePairError {
    #[error("invalid response '{0}': expected ITEM=CHOICE")]
    MissingSeparator(String),
    #[error("invalid response '{0}': item ID is empty")]
    EmptyItem(String),
    #[error("invalid response '{0}': choice is empty")]
    EmptyChoice(String),
}

/// An `ITEM=CHOICE` pair as typed on the command line, before ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePair {
    pub item_id: String,
    pub choice: String,
}

impl FromStr for ResponsePair {
    type Err = ResponsePairError;

    /// Splits on the first `=` so choices may themselves contain `=`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (item, choice) = s
            .split_once('=')
            .ok_or_else(|| ResponsePairError::MissingSeparator(s.to_string()))?;
        let item = item.trim();
        let choice = choice.trim();
        if item.is_empty() {
            return Err(ResponsePairError::EmptyItem(s.to_string()));
        }
        if choice.is_empty() {
            return Err(ResponsePairError::EmptyChoice(s.to_string()));
        }
        Ok(ResponsePair {
            item_id: item.to_string(),
            choice: choice.to_string(),
        })
    }
}

/// Assign 1-based `Order` values from the pairs' positions.
pub fn to_item_responses(pairs: &[ResponsePair]) -> Vec<ItemResponse> {
    pairs
        .iter()
        .enumerate()
        .map(|(idx, pair)| ItemResponse {
            item_id: pair.item_id.clone(),
            item_response_oid: pair.choice.clone(),
            order: idx as u32 + 1,
        })
        .collect()
}
