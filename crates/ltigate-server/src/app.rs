//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/lti",
            get(handlers::context::get_context).post(handlers::launch::post_launch),
        )
        .route("/lti/ci", post(handlers::content_item::post_content_item))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    fn launch_request(entries: &[(&str, &str)]) -> Request<Body> {
        let body = serde_urlencoded::to_string(entries).unwrap();
        Request::builder()
            .method("POST")
            .uri("/lti")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_launch_route_redirects_and_sets_cookie() {
        let app = create_router(testing::state());

        let response = app
            .oneshot(launch_request(&[("custom_tool", "/tools/editor")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/tools/editor"
        );
        assert!(response.headers().contains_key(header::SET_COOKIE));
    }

    #[tokio::test]
    async fn test_security_headers_applied_to_every_response() {
        let app = create_router(testing::state());

        let response = app
            .oneshot(launch_request(&[("user_id", "jane")]))
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("x-content-type-options").unwrap(),
            "nosniff"
        );
        assert!(
            response
                .headers()
                .contains_key("content-security-policy")
        );
    }

    #[tokio::test]
    async fn test_context_route_round_trips_launch_session() {
        let app = create_router(testing::state());

        let launched = app
            .clone()
            .oneshot(launch_request(&[("user_id", "jane")]))
            .await
            .unwrap();
        let cookie = launched.headers().get(header::SET_COOKIE).unwrap();
        let cookie_pair = cookie.to_str().unwrap().split(';').next().unwrap().to_owned();

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/lti")
                    .header(header::COOKIE, cookie_pair)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_context_route_without_session_is_not_found() {
        let app = create_router(testing::state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/lti")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_content_item_route_without_session_is_not_found() {
        let app = create_router(testing::state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/lti/ci")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("title=Recording"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
