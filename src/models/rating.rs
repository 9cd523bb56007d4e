use crate::models::catalog::Tool;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// A star rating and optional review of one tool
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: u64,
    pub user_id: u64,
    pub user_name: String,
    pub user_email: String,
    pub tool: Tool,
    /// Always within 1..=5
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub email: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
}

/// Validate a requested star count
pub fn checked_rating(value: i64) -> Option<u8> {
    if (MIN_RATING..=MAX_RATING).contains(&value) {
        u8::try_from(value).ok()
    } else {
        None
    }
}

/// Blank comments are stored as absent
pub fn normalize_comments(comments: Option<String>) -> Option<String> {
    comments
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// Form input for a new rating
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRating {
    pub tool: Tool,
    pub rating: i64,
    #[serde(default)]
    pub comments: Option<String>,
    pub contact_email: String,
}

/// Admin changes to an existing rating
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingEdit {
    pub tool: Tool,
    pub rating: i64,
    #[serde(default)]
    pub comments: Option<String>,
}
