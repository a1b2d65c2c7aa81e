//! Shared state for the demo API handlers.

use std::sync::Arc;

use crate::auth::SessionStore;
use crate::store::UserStore;

/// State passed to the demo handlers via `Arc`.
#[derive(Debug, Default)]
pub struct DemoState {
    /// Volatile user table.
    pub users: UserStore,
    /// Sessions issued by `/auth/login`. Only the auth demo checks them.
    pub sessions: Arc<SessionStore>,
}

impl DemoState {
    /// State with the two sample users.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            users: UserStore::seeded(),
            sessions: Arc::default(),
        }
    }
}
