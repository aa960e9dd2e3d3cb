//! Client-side state
//!
//! Authentication state shared with the UI, and session storage.

pub mod auth_store;
pub mod session;

pub use auth_store::{AuthStore, AuthState};
pub use session::{SessionStorage, USER_EMAIL_KEY};
