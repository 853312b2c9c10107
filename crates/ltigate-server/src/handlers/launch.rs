//! LTI launch endpoint.
//!
//! Accepts the launch POST (already OAuth-verified upstream), stores the
//! extracted launch context in the browser session and redirects to the
//! requested tool.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use ltigate_core::content_item::html_escape;
use ltigate_core::params::{self, CUSTOM_TEST, LTI_MESSAGE_TYPE, MESSAGE_TYPE_CONTENT_ITEM};
use ltigate_core::{extract_launch_context, tool};
use uuid::Uuid;

use crate::error::ServerError;
use crate::handlers::content_item;
use crate::session;
use crate::state::AppState;

/// Request parameter switching a POST into the content-item return flow.
const RETURN_CONTENT_ITEM: &str = "returnContentItem";

/// Handle POST /lti.
pub(crate) async fn post_launch(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(request): Form<HashMap<String, String>>,
) -> Result<Response, ServerError> {
    // A POST carrying a selection result goes back to the LMS instead
    if request.contains_key(RETURN_CONTENT_ITEM) {
        return content_item::respond(&state, &jar, &request).map(IntoResponse::into_response);
    }

    // The launch begins the browser session; synthesize one when the
    // client brings no usable cookie
    let session_id = session::session_id(&jar).unwrap_or_else(Uuid::new_v4);
    state
        .sessions
        .put(session_id, extract_launch_context(&request));
    let jar = jar.add(session::session_cookie(session_id));

    let message_type = request.get(LTI_MESSAGE_TYPE).map_or("", |v| v.trim());
    let is_content_item = message_type == MESSAGE_TYPE_CONTENT_ITEM;
    tracing::debug!(message_type, "received LTI launch");

    let target = tool::resolve_redirect_target(is_content_item, &request, &state.tools_path);
    let redirect_url = target.to_uri_string();

    // The client can request a debug confirmation page instead of the
    // redirect by setting custom_test
    if params::is_truthy(request.get(CUSTOM_TEST)) {
        return Ok((jar, Html(debug_page(&redirect_url))).into_response());
    }

    tracing::debug!(redirect_url, "redirecting launch to tool");
    Ok((jar, Redirect::to(&redirect_url)).into_response())
}

/// Render the debug confirmation page showing the redirect destination.
fn debug_page(redirect_url: &str) -> String {
    let escaped = html_escape(redirect_url);
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<body>\n");
    let _ = writeln!(html, "<p>Welcome to ltigate; you are going to {escaped}</p>");
    let _ = writeln!(html, "<a href=\"{escaped}\">continue...</a>");
    html.push_str("</body>\n</html>\n");
    html
}
