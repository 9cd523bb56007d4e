use crate::core::error::HelpCenterError;
use crate::core::state::AppState;
use crate::handlers::extract::{JsonBody, PathParam, QueryParams};
use crate::models::api::{DataResponse, IssueListQuery, PostMessageRequest};
use crate::models::issue::{Issue, NewIssue, ThreadSummary};
use crate::models::message::Message;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

/// POST /issues
pub async fn submit_issue_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(form): JsonBody<NewIssue>,
) -> Result<Response, HelpCenterError> {
    let desk = state.desk()?;
    let session = desk.current_user();
    let issue = desk.issues().submit(session.as_ref(), form)?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(issue))).into_response())
}

/// Issue queue, newest first
///
/// GET /issues?status=all|new|resolved
pub async fn list_issues_handler(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<IssueListQuery>,
) -> Result<Json<DataResponse<Vec<Issue>>>, HelpCenterError> {
    let desk = state.desk()?;
    let session = desk.current_user();
    desk.gate().require_admin(session.as_ref())?;

    Ok(Json(DataResponse::new(desk.issues().list(query.status))))
}

/// GET /issues/active
pub async fn active_threads_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<ThreadSummary>>>, HelpCenterError> {
    let desk = state.desk()?;
    let session = desk.current_user();
    let threads = desk.issues().active_threads(session.as_ref())?;

    Ok(Json(DataResponse::new(threads)))
}

/// POST /issues/{id}/resolve
pub async fn resolve_issue_handler(
    State(state): State<Arc<AppState>>,
    PathParam(issue_id): PathParam<u64>,
) -> Result<Json<DataResponse<Issue>>, HelpCenterError> {
    let desk = state.desk()?;
    let session = desk.current_user();
    let issue = desk.issues().resolve(session.as_ref(), issue_id)?;

    Ok(Json(DataResponse::new(issue)))
}

/// A thread is visible to the issue's reporter and to admins
///
/// GET /issues/{id}/messages
pub async fn thread_handler(
    State(state): State<Arc<AppState>>,
    PathParam(issue_id): PathParam<u64>,
) -> Result<Json<DataResponse<Vec<Message>>>, HelpCenterError> {
    let desk = state.desk()?;
    let session = desk.current_user();
    let user = session.as_ref().ok_or(HelpCenterError::AuthRequired)?;

    let issue = desk
        .issues()
        .get(issue_id)
        .ok_or_else(|| HelpCenterError::NotFound(format!("Issue {}", issue_id)))?;

    if issue.user_id != user.id {
        desk.gate().require_admin(Some(user))?;
    }

    Ok(Json(DataResponse::new(desk.issues().thread_for(issue_id))))
}

/// POST /issues/{id}/messages
pub async fn post_message_handler(
    State(state): State<Arc<AppState>>,
    PathParam(issue_id): PathParam<u64>,
    JsonBody(body): JsonBody<PostMessageRequest>,
) -> Result<Response, HelpCenterError> {
    let desk = state.desk()?;
    let session = desk.current_user();
    let message = desk
        .issues()
        .post_message(session.as_ref(), issue_id, body.sender, &body.text)?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(message))).into_response())
}
