use std::sync::Arc;

use axum_test::TestServer;
use portfolio_api::build_router;
use portfolio_api::config::Config;
use portfolio_api::repositories::InMemoryProjectRepository;
use portfolio_api::state::AppState;

use super::failing::FailingProjectRepository;

/// Test configuration
pub fn test_config() -> Config {
    Config {
        mongodb_url: std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
        mongodb_database: "portfolio_test".to_string(),
        mongodb_collection: "projects".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

/// Test application wrapper
#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub repository: InMemoryProjectRepository,
}

#[allow(dead_code)]
impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        // Use the in-memory repository (avoids a MongoDB dependency in tests)
        let repository = InMemoryProjectRepository::new();
        let state = AppState::with_repository(test_config(), Arc::new(repository.clone()));

        let router = build_router(state.clone());
        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            state,
            repository,
        }
    }
}

/// A server whose store rejects every call
#[allow(dead_code)]
pub fn failing_server() -> TestServer {
    let state = AppState::with_repository(test_config(), Arc::new(FailingProjectRepository));

    TestServer::new(build_router(state)).expect("Failed to create test server")
}
