use serde::{Deserialize, Serialize};
use std::fmt;

/// Tools a user can report an issue against or review
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    DataAnalyzer,
    ReportGenerator,
    Dashboard,
    ApiClient,
    Other,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::DataAnalyzer,
        Tool::ReportGenerator,
        Tool::Dashboard,
        Tool::ApiClient,
        Tool::Other,
    ];

    /// Identifier as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::DataAnalyzer => "data-analyzer",
            Tool::ReportGenerator => "report-generator",
            Tool::Dashboard => "dashboard",
            Tool::ApiClient => "api-client",
            Tool::Other => "other",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a reported issue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Bug,
    Performance,
    Ui,
    Feature,
    Other,
}

impl IssueType {
    pub const ALL: [IssueType; 5] = [
        IssueType::Bug,
        IssueType::Performance,
        IssueType::Ui,
        IssueType::Feature,
        IssueType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Bug => "bug",
            IssueType::Performance => "performance",
            IssueType::Ui => "ui",
            IssueType::Feature => "feature",
            IssueType::Other => "other",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
