use crate::core::error::HelpCenterError;
use crate::core::state::AppState;
use crate::handlers::extract::JsonBody;
use crate::models::api::{DataResponse, LoginRequest, RegisterRequest, SuccessResponse};
use crate::models::user::{User, UserProfile, UserSummary};
use crate::services::desk::HelpDesk;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

fn summary(desk: &HelpDesk, user: &User) -> UserSummary {
    UserSummary::from_user(user, desk.gate().is_admin(Some(user)))
}

/// Create an account and log it in
///
/// POST /account/register
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<Response, HelpCenterError> {
    let created = state
        .run_blocking(move |desk| {
            let user = desk
                .sessions()
                .register(&body.name, &body.email, &body.password, &body.confirm_password)?;
            Ok(summary(desk, &user))
        })
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(created))).into_response())
}

/// POST /account/login
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<Json<DataResponse<UserSummary>>, HelpCenterError> {
    let user = state
        .run_blocking(move |desk| {
            let user = desk.sessions().login(&body.email, &body.password)?;
            Ok(summary(desk, &user))
        })
        .await?;

    Ok(Json(DataResponse::new(user)))
}

/// POST /account/logout
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SuccessResponse>, HelpCenterError> {
    state.desk()?.sessions().logout()?;

    Ok(Json(SuccessResponse::new("Logged out successfully")))
}

/// The logged-in user's profile and activity counts
///
/// GET /account/me
pub async fn me_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<UserProfile>>, HelpCenterError> {
    let profile = state
        .desk()?
        .sessions()
        .profile()
        .ok_or(HelpCenterError::AuthRequired)?;

    Ok(Json(DataResponse::new(profile)))
}
