//! Observable authentication state
//!
//! Holds the signed-in user and the loading flag shown while a sign-in is in
//! flight. Clones share the same state; subscribers are notified on every
//! change.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;
use crate::models::User;

/// Snapshot of the authentication state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

/// Shared handle to the authentication state
#[derive(Debug, Clone)]
pub struct AuthStore {
    tx: Arc<watch::Sender<AuthState>>,
}

impl AuthStore {
    /// Create an empty store (no user, not loading)
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthState::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn set_loading(&self, loading: bool) {
        debug!(loading = loading, "Auth store loading changed");
        self.tx.send_modify(|state| state.loading = loading);
    }

    /// Store the signed-in user and end any pending loading state
    pub fn set_user(&self, user: User) {
        debug!(email = %user.email, "Auth store user set");
        self.tx.send_modify(|state| {
            state.user = Some(user);
            state.loading = false;
        });
    }

    pub fn clear_user(&self) {
        debug!("Auth store user cleared");
        self.tx.send_modify(|state| {
            state.user = None;
            state.loading = false;
        });
    }

    pub fn snapshot(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.tx.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.tx.borrow().loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().user.is_some()
    }

    /// Receive a notification whenever the state changes
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_user() -> User {
        User {
            id: "u-1".to_string(),
            email: "ana@example.com".to_string(),
            fullname: Some("Ana".to_string()),
            avatar_url: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_set_user_ends_loading() {
        let store = AuthStore::new();
        store.set_loading(true);
        assert!(store.is_loading());

        store.set_user(sample_user());
        assert!(!store.is_loading());
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_clones_share_state() {
        let store = AuthStore::new();
        let other = store.clone();
        store.set_user(sample_user());
        assert_eq!(other.user().map(|u| u.id), Some("u-1".to_string()));

        other.clear_user();
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = AuthStore::new();
        let mut rx = store.subscribe();

        store.set_loading(true);
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().loading);
    }
}
