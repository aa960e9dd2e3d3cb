//! Test helpers module
//!
//! This module provides utilities and helpers for testing the ProjectHub
//! client: a mock backend and a unified test context.

#![allow(dead_code)]

pub mod backend_mock;
pub mod test_context;

pub use backend_mock::*;
pub use test_context::*;
