//! In-memory user store for the demo API.
//!
//! Users live in a `BTreeMap` behind a `RwLock` and are lost when the
//! process exits. Ids come from an atomic counter and are never reused.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::ToSchema;

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john@example.com")]
    pub email: String,
}

/// Fields a client supplies when creating or replacing a user.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UserRequest {
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john@example.com")]
    pub email: String,
}

/// Thread-safe user table.
#[derive(Debug)]
pub struct UserStore {
    users: RwLock<BTreeMap<u64, User>>,
    next_id: AtomicU64,
}

impl UserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a store holding the two sample users.
    #[must_use]
    pub fn seeded() -> Self {
        let seed = [
            ("John Doe", "john@example.com"),
            ("Jane Smith", "jane@example.com"),
        ];
        let mut users = BTreeMap::new();
        for (index, (name, email)) in (1u64..).zip(seed) {
            users.insert(
                index,
                User {
                    id: index,
                    name: name.to_owned(),
                    email: email.to_owned(),
                },
            );
        }
        let next = u64::try_from(users.len()).unwrap_or(u64::MAX).saturating_add(1);
        Self {
            users: RwLock::new(users),
            next_id: AtomicU64::new(next),
        }
    }

    /// All users ordered by id.
    pub async fn list(&self) -> Vec<User> {
        self.users.read().await.values().cloned().collect()
    }

    /// Look up one user.
    pub async fn get(&self, id: u64) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    /// Store a new user under a fresh id.
    pub async fn create(&self, req: UserRequest) -> User {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let user = User {
            id,
            name: req.name,
            email: req.email,
        };
        self.users.write().await.insert(id, user.clone());
        user
    }

    /// Replace an existing user's fields. Returns `None` if the id is unknown.
    pub async fn update(&self, id: u64, req: UserRequest) -> Option<User> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id)?;
        user.name = req.name;
        user.email = req.email;
        Some(user.clone())
    }

    /// Remove a user. Returns whether it existed.
    pub async fn delete(&self, id: u64) -> bool {
        self.users.write().await.remove(&id).is_some()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
