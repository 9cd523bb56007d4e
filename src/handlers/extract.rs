use crate::core::error::HelpCenterError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON request body; decoding failures answer with the JSON error body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(HelpCenterError))]
pub struct JsonBody<T>(pub T);

/// Query string, rejected the same way as `JsonBody`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(HelpCenterError))]
pub struct QueryParams<T>(pub T);

/// Path parameters, rejected the same way as `JsonBody`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(HelpCenterError))]
pub struct PathParam<T>(pub T);
