use crate::core::error::HelpCenterError;
use crate::core::state::AppState;
use crate::handlers::extract::{JsonBody, PathParam};
use crate::models::api::{AdminEmailRequest, DataResponse, SuccessResponse};
use crate::models::user::UserSummary;
use axum::{
    extract::State,
    response::Json,
};
use std::sync::Arc;

/// Public, so the admin sign-in page can show who has access
///
/// GET /admin/emails
pub async fn list_admin_emails_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<String>>>, HelpCenterError> {
    let emails = state.desk()?.gate().admin_emails();

    Ok(Json(DataResponse::new(emails)))
}

/// POST /admin/emails
pub async fn add_admin_email_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<AdminEmailRequest>,
) -> Result<Json<SuccessResponse>, HelpCenterError> {
    let desk = state.desk()?;
    let session = desk.current_user();
    desk.gate().add_admin_email(session.as_ref(), &body.email)?;

    Ok(Json(SuccessResponse::new(format!(
        "Admin access granted to {}",
        body.email.trim()
    ))))
}

/// DELETE /admin/emails/{email}
pub async fn remove_admin_email_handler(
    State(state): State<Arc<AppState>>,
    PathParam(email): PathParam<String>,
) -> Result<Json<SuccessResponse>, HelpCenterError> {
    let desk = state.desk()?;
    let session = desk.current_user();
    desk.gate().remove_admin_email(session.as_ref(), &email)?;

    Ok(Json(SuccessResponse::new(format!("Admin access revoked for {}", email.trim()))))
}

/// GET /admin/users
pub async fn list_users_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<UserSummary>>>, HelpCenterError> {
    let desk = state.desk()?;
    let session = desk.current_user();
    let users = desk.gate().list_users(session.as_ref())?;

    Ok(Json(DataResponse::new(users)))
}
