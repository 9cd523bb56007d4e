use crate::models::catalog::Tool;
use crate::models::issue::IssueFilter;
use crate::models::message::Sender;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct PostMessageRequest {
    pub sender: Sender,
    pub text: String,
}

#[derive(Deserialize)]
pub struct AdminEmailRequest {
    pub email: String,
}

#[derive(Deserialize, Default)]
pub struct IssueListQuery {
    #[serde(default)]
    pub status: IssueFilter,
}

#[derive(Deserialize, Default)]
pub struct RatingListQuery {
    pub tool: Option<Tool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

impl SuccessResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Successful response carrying a payload
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { success: true, data }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub tools: Vec<CatalogEntry>,
    pub issue_types: Vec<CatalogEntry>,
}
