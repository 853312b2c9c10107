//! Launch context read model.
//!
//! GET requests at the launch endpoint return the launch parameters
//! stored for the current browser session as JSON.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use ltigate_core::LaunchContext;

use crate::error::ServerError;
use crate::session;
use crate::state::AppState;

/// Handle GET /lti.
///
/// Requests without a launch session are a missing-resource condition; a
/// session whose launch carried no recognized parameters yields `{}`.
pub(crate) async fn get_context(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Json<LaunchContext>, ServerError> {
    let session_id = session::session_id(&jar).ok_or(ServerError::SessionNotFound)?;
    let context = state
        .sessions
        .get(session_id)
        .ok_or(ServerError::SessionNotFound)?;
    Ok(Json(context))
}
