//! HTTP request handlers.

pub(crate) mod content_item;
pub(crate) mod context;
pub(crate) mod launch;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use ltigate_core::StaticCredentialStore;

    use crate::session::MemorySessionStore;
    use crate::state::AppState;

    /// State with one registered consumer and an empty session store.
    pub(crate) fn state() -> Arc<AppState> {
        Arc::new(AppState {
            credentials: Arc::new(StaticCredentialStore::new([(
                "consumerkey".to_owned(),
                "consumersecret".to_owned(),
            )])),
            sessions: Arc::new(MemorySessionStore::default()),
            tools_path: "/ltitools".to_owned(),
        })
    }
}
