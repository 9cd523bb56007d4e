use crate::models::api::{CatalogEntry, CatalogResponse, DataResponse};
use crate::models::catalog::{IssueType, Tool};
use axum::Json;

/// Human-readable tool name. Unknown identifiers are shown as-is.
pub fn tool_display_name(id: &str) -> String {
    Tool::ALL
        .iter()
        .find(|t| t.as_str() == id)
        .map(|t| tool_label(*t).to_string())
        .unwrap_or_else(|| id.to_string())
}

/// Human-readable issue category. Unknown identifiers are shown as-is.
pub fn issue_type_display_name(id: &str) -> String {
    IssueType::ALL
        .iter()
        .find(|t| t.as_str() == id)
        .map(|t| issue_type_label(*t).to_string())
        .unwrap_or_else(|| id.to_string())
}

fn tool_label(tool: Tool) -> &'static str {
    match tool {
        Tool::DataAnalyzer => "Data Analyzer",
        Tool::ReportGenerator => "Report Generator",
        Tool::Dashboard => "Dashboard",
        Tool::ApiClient => "API Client",
        Tool::Other => "Other",
    }
}

fn issue_type_label(issue_type: IssueType) -> &'static str {
    match issue_type {
        IssueType::Bug => "Bug/Error",
        IssueType::Performance => "Performance Issue",
        IssueType::Ui => "UI/UX Problem",
        IssueType::Feature => "Feature Request",
        IssueType::Other => "Other",
    }
}

fn catalog_entry(id: &str, display_name: fn(&str) -> String) -> CatalogEntry {
    CatalogEntry {
        id: id.to_string(),
        name: display_name(id),
    }
}

/// Tools and issue categories for building forms
///
/// GET /catalog
pub async fn catalog_handler() -> Json<DataResponse<CatalogResponse>> {
    let tools = Tool::ALL
        .iter()
        .map(|t| catalog_entry(t.as_str(), tool_display_name))
        .collect();
    let issue_types = IssueType::ALL
        .iter()
        .map(|t| catalog_entry(t.as_str(), issue_type_display_name))
        .collect();

    Json(DataResponse::new(CatalogResponse { tools, issue_types }))
}
