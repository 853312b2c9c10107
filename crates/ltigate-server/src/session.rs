//! Launch session store.
//!
//! The extracted launch context lives for the duration of the browser
//! session, keyed by an opaque session id carried in a cookie. A later
//! launch in the same session overwrites the stored context (last write
//! wins). Stored contexts expire after [`DEFAULT_SESSION_TTL`]; the
//! in-memory store sweeps expired entries on every write, so the launch
//! endpoint cannot grow it without bound.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use axum_extra::extract::cookie::{Cookie, CookieJar};
use ltigate_core::LaunchContext;
use uuid::Uuid;

/// Name of the session cookie.
pub(crate) const SESSION_COOKIE: &str = "LTISESSION";

/// How long a stored launch context stays readable after its last write.
pub(crate) const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// Session-scoped storage of launch contexts.
pub(crate) trait SessionStore: Send + Sync {
    /// Store a launch context, overwriting any existing one.
    fn put(&self, session_id: Uuid, context: LaunchContext);

    /// Read the launch context of a session.
    ///
    /// Returns `None` for a session no launch has ever populated, and for
    /// one whose context has expired.
    fn get(&self, session_id: Uuid) -> Option<LaunchContext>;
}

struct SessionEntry {
    stored_at: Instant,
    context: LaunchContext,
}

impl SessionEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

/// In-memory session store with time-based expiry.
pub(crate) struct MemorySessionStore {
    ttl: Duration,
    entries: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl MemorySessionStore {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

impl SessionStore for MemorySessionStore {
    fn put(&self, session_id: Uuid, context: LaunchContext) {
        let mut entries = self.entries.write().expect("session store lock poisoned");
        entries.retain(|_, entry| entry.is_fresh(self.ttl));
        entries.insert(
            session_id,
            SessionEntry {
                stored_at: Instant::now(),
                context,
            },
        );
    }

    fn get(&self, session_id: Uuid) -> Option<LaunchContext> {
        self.entries
            .read()
            .expect("session store lock poisoned")
            .get(&session_id)
            .filter(|entry| entry.is_fresh(self.ttl))
            .map(|entry| entry.context.clone())
    }
}

/// Read the session id from the request cookies.
///
/// A cookie that does not hold a UUID is treated as absent.
pub(crate) fn session_id(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

/// Build the session cookie for a session id.
///
/// Always issued with `Path=/` so every tool under this origin shares the
/// launch session.
pub(crate) fn session_cookie(session_id: Uuid) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .http_only(true)
        .build()
}
