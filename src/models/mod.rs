//! Data models module
//!
//! This module contains the records exchanged with the backend API

pub mod user;
pub mod project;
pub mod response;

// Re-export commonly used models
pub use user::{User, LoginRequest, SignupRequest, AuthResponse, NewUser, UserSettings, UserUpdateRequest};
pub use project::{Project, CreateProject, UpdateProject};
pub use response::{ApiEnvelope, ErrorBody};
