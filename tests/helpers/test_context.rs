//! Test context for unified test setup
//!
//! This module provides a test context that wires the API clients against a
//! mock backend.

use projecthub::{ApiFactory, AuthStore, SessionStorage, Settings};

use super::backend_mock::BackendMockServer;

/// Test context holding the mock backend and the clients pointed at it
pub struct TestContext {
    pub backend: BackendMockServer,
    pub settings: Settings,
    pub store: AuthStore,
    pub session: SessionStorage,
    pub api: ApiFactory,
}

impl TestContext {
    /// Create a context where browser and server calls reach the same mock
    pub async fn new() -> Self {
        let backend = BackendMockServer::new().await;
        let settings = test_settings(&backend.uri(), &backend.uri());
        Self::with_settings(backend, settings)
    }

    pub fn with_settings(backend: BackendMockServer, settings: Settings) -> Self {
        // Initialize logging once
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let store = AuthStore::new();
        let session = SessionStorage::in_memory();
        let api = ApiFactory::new(&settings, store.clone(), session.clone())
            .expect("Failed to create API factory");

        Self {
            backend,
            settings,
            store,
            session,
            api,
        }
    }
}

/// Create test-specific settings
pub fn test_settings(base_url: &str, server_base_url: &str) -> Settings {
    let mut settings = Settings::default();
    settings.api.base_url = base_url.to_string();
    settings.api.server_base_url = server_base_url.to_string();
    settings.api.timeout_seconds = 2;
    settings.logging.level = "debug".to_string();
    settings
}
