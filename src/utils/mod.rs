//! Utility modules
//!
//! This module contains common utilities used throughout the crate,
//! including error handling, logging setup, and helper functions.

pub mod errors;
pub mod logging;
pub mod helpers;

pub use errors::{ProjectHubError, ApiError, Result};
pub use helpers::{Cookie, build_cookie_header};
