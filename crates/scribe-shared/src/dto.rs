//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest body shown in post listings, in characters.
pub const SUMMARY_BODY_CHARS: usize = 200;

/// A post as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    #[serde(rename = "publishedDate")]
    pub published_date: DateTime<Utc>,
}

impl PostResponse {
    /// Listing form: bodies longer than [`SUMMARY_BODY_CHARS`] are cut and end in `...`.
    pub fn summarized(mut self) -> Self {
        if let Some((cut, _)) = self.body.char_indices().nth(SUMMARY_BODY_CHARS) {
            self.body.truncate(cut);
            self.body.push_str("...");
        }
        self
    }
}
