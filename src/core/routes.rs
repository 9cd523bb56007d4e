// HTTP routes configuration

use crate::core::state::AppState;
use crate::handlers::{accounts, admins, catalog, fallback, health, issues, ratings};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Public endpoints
        .route("/health", get(health::health_handler))
        .route("/catalog", get(catalog::catalog_handler))
        .route("/ratings", get(ratings::list_ratings_handler).post(ratings::submit_rating_handler))

        // Account endpoints
        .route("/account/register", post(accounts::register_handler))
        .route("/account/login", post(accounts::login_handler))
        .route("/account/logout", post(accounts::logout_handler))
        .route("/account/me", get(accounts::me_handler))

        // Issues and their threads
        .route("/issues", get(issues::list_issues_handler).post(issues::submit_issue_handler))
        .route("/issues/active", get(issues::active_threads_handler))
        .route("/issues/{id}/resolve", post(issues::resolve_issue_handler))
        .route(
            "/issues/{id}/messages",
            get(issues::thread_handler).post(issues::post_message_handler),
        )

        // Moderation (admin session required)
        .route(
            "/ratings/{id}",
            put(ratings::edit_rating_handler).delete(ratings::remove_rating_handler),
        )
        .route(
            "/admin/emails",
            get(admins::list_admin_emails_handler).post(admins::add_admin_email_handler),
        )
        .route("/admin/emails/{email}", delete(admins::remove_admin_email_handler))
        .route("/admin/users", get(admins::list_users_handler))

        // 404 fallback for all unmatched routes
        .fallback(fallback::fallback_handler)

        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::create_test_state;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let router = build_router(create_test_state());

        let (status, body) = send(&router, "GET", "/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_issue_lifecycle_over_http() {
        let router = build_router(create_test_state());

        let (status, _) = send(
            &router,
            "POST",
            "/account/register",
            Some(json!({"name": "Ann", "email": "a@x.com", "password": "pw", "confirmPassword": "pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, issue) = send(
            &router,
            "POST",
            "/issues",
            Some(json!({
                "tool": "api-client",
                "type": "bug",
                "title": "Timeouts",
                "description": "Requests hang",
                "contactEmail": "a@x.com"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(issue["data"]["status"], "new");
        let id = issue["data"]["id"].as_u64().unwrap();

        let (status, body) = send(&router, "GET", "/issues", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Admin access required");

        send(&router, "POST", "/account/logout", None).await;
        let (status, _) = send(
            &router,
            "POST",
            "/account/register",
            Some(json!({"name": "Boss", "email": "admin@x.com", "password": "pw", "confirmPassword": "pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(
            &router,
            "POST",
            &format!("/issues/{}/messages", id),
            Some(json!({"sender": "admin", "text": "Looking into it"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(&router, "POST", &format!("/issues/{}/resolve", id), None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, resolved) = send(&router, "GET", "/issues?status=resolved", None).await;
        assert_eq!(resolved["data"].as_array().unwrap().len(), 1);

        let (_, thread) = send(&router, "GET", &format!("/issues/{}/messages", id), None).await;
        assert_eq!(thread["data"][0]["sender"], "admin");
    }

    #[tokio::test]
    async fn test_ratings_over_http() {
        let router = build_router(create_test_state());

        let (status, _) = send(
            &router,
            "POST",
            "/ratings",
            Some(json!({"tool": "dashboard", "rating": 5, "contactEmail": "a@x.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        send(
            &router,
            "POST",
            "/account/register",
            Some(json!({"name": "Ann", "email": "a@x.com", "password": "pw", "confirmPassword": "pw"})),
        )
        .await;
        let (status, _) = send(
            &router,
            "POST",
            "/ratings",
            Some(json!({"tool": "dashboard", "rating": 5, "contactEmail": "a@x.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, listed) = send(&router, "GET", "/ratings?tool=dashboard", None).await;
        assert_eq!(listed["data"][0]["rating"], 5);
        let (_, other) = send(&router, "GET", "/ratings?tool=other", None).await;
        assert!(other["data"].as_array().unwrap().is_empty());

        let (status, _) = send(&router, "DELETE", "/admin/emails/admin@x.com", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_allow_list_public_over_http() {
        let router = build_router(create_test_state());

        let (status, body) = send(&router, "GET", "/admin/emails", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!(["admin@x.com"]));
    }

    #[tokio::test]
    async fn test_undecodable_requests_use_json_errors() {
        let router = build_router(create_test_state());

        let (status, body) = send(&router, "GET", "/ratings?tool=spreadsheet", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request"));

        let (status, body) = send(&router, "POST", "/account/login", Some(json!({"email": "a@x.com"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, body) = send(&router, "POST", "/issues/abc/resolve", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }
}
