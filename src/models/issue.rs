use crate::models::catalog::{IssueType, Tool};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    New,
    Resolved,
}

/// Which issues a listing should include
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueFilter {
    #[default]
    All,
    New,
    Resolved,
}

impl IssueFilter {
    pub fn matches(&self, status: IssueStatus) -> bool {
        match self {
            IssueFilter::All => true,
            IssueFilter::New => status == IssueStatus::New,
            IssueFilter::Resolved => status == IssueStatus::Resolved,
        }
    }
}

/// A reported problem with one of the tools.
///
/// `user_name` and `user_email` are a snapshot of the reporter taken at
/// submission time and are not kept in sync afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: u64,
    pub user_id: u64,
    pub user_name: String,
    pub user_email: String,
    pub tool: Tool,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub title: String,
    pub description: String,
    /// Contact address given on the form
    pub email: String,
    pub timestamp: DateTime<Utc>,
    pub status: IssueStatus,
}

impl Issue {
    pub fn is_resolved(&self) -> bool {
        self.status == IssueStatus::Resolved
    }
}

/// Form input for a new issue
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIssue {
    pub tool: Tool,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub title: String,
    pub description: String,
    pub contact_email: String,
}

/// An open issue together with the size of its message thread
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSummary {
    pub issue: Issue,
    pub message_count: usize,
}
