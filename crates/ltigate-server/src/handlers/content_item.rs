//! Content-item return endpoint.
//!
//! The selection a user made inside a tool goes back to the LMS as an
//! OAuth-signed form POST. The consumer key, return URL and opaque `data`
//! value come from the launch context stored at launch time; the request
//! itself carries only the selected resource.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::response::Html;
use axum_extra::extract::cookie::CookieJar;
use ltigate_core::content_item::{SelectedResource, build_content_item_return, render_launch_form};
use ltigate_core::params::{self, CONTENT_ITEM_RETURN_URL, DATA, OAUTH_CONSUMER_KEY};

use crate::error::ServerError;
use crate::session;
use crate::state::AppState;

/// Handle POST /lti/ci.
pub(crate) async fn post_content_item(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(request): Form<HashMap<String, String>>,
) -> Result<Html<String>, ServerError> {
    respond(&state, &jar, &request)
}

/// Build and render the signed content-item return.
///
/// Shared with the launch endpoint, which dispatches here for POSTs
/// carrying `returnContentItem`.
pub(crate) fn respond(
    state: &AppState,
    jar: &CookieJar,
    request: &HashMap<String, String>,
) -> Result<Html<String>, ServerError> {
    // The return depends on state only a prior launch can have created
    let session_id = session::session_id(jar).ok_or(ServerError::SessionNotFound)?;
    let context = state
        .sessions
        .get(session_id)
        .ok_or(ServerError::SessionNotFound)?;

    let consumer_key = context
        .get(OAUTH_CONSUMER_KEY)
        .ok_or(ServerError::MissingParameter(OAUTH_CONSUMER_KEY))?;
    let return_url = context
        .get(CONTENT_ITEM_RETURN_URL)
        .ok_or(ServerError::MissingParameter(CONTENT_ITEM_RETURN_URL))?;

    let resource = SelectedResource {
        title: request.get("title").cloned(),
        text: request.get("created").cloned(),
        tool: request.get("player").cloned(),
        thumbnail: request.get("image").cloned(),
    };

    let payload = build_content_item_return(
        state.credentials.as_ref(),
        consumer_key,
        &resource.to_content_items(),
        context.get(DATA).map(String::as_str),
        return_url,
    )?;

    tracing::debug!(return_url, "returning content-item selection to LMS");
    let test_mode = params::is_truthy(request.get("test"));
    Ok(Html(render_launch_form(&payload, return_url, test_mode)))
}
