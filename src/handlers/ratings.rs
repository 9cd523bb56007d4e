use crate::core::error::HelpCenterError;
use crate::core::state::AppState;
use crate::handlers::extract::{JsonBody, PathParam, QueryParams};
use crate::models::api::{DataResponse, RatingListQuery, SuccessResponse};
use crate::models::rating::{NewRating, Rating, RatingEdit};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

/// POST /ratings
pub async fn submit_rating_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(form): JsonBody<NewRating>,
) -> Result<Response, HelpCenterError> {
    let desk = state.desk()?;
    let session = desk.current_user();
    let rating = desk.ratings().submit(session.as_ref(), form)?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(rating))).into_response())
}

/// Public listing; no login needed
///
/// GET /ratings?tool=<id>
pub async fn list_ratings_handler(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<RatingListQuery>,
) -> Result<Json<DataResponse<Vec<Rating>>>, HelpCenterError> {
    let ratings = state.desk()?.ratings().list(query.tool);

    Ok(Json(DataResponse::new(ratings)))
}

/// PUT /ratings/{id}
pub async fn edit_rating_handler(
    State(state): State<Arc<AppState>>,
    PathParam(rating_id): PathParam<u64>,
    JsonBody(changes): JsonBody<RatingEdit>,
) -> Result<Json<DataResponse<Rating>>, HelpCenterError> {
    let desk = state.desk()?;
    let session = desk.current_user();
    let rating = desk.ratings().edit(session.as_ref(), rating_id, changes)?;

    Ok(Json(DataResponse::new(rating)))
}

/// DELETE /ratings/{id}
pub async fn remove_rating_handler(
    State(state): State<Arc<AppState>>,
    PathParam(rating_id): PathParam<u64>,
) -> Result<Json<SuccessResponse>, HelpCenterError> {
    let desk = state.desk()?;
    let session = desk.current_user();
    let removed = desk.ratings().remove(session.as_ref(), rating_id)?;

    Ok(Json(SuccessResponse::new(format!(
        "Rating {} by {} removed",
        removed.id, removed.user_name
    ))))
}
