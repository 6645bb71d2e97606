use std::sync::Arc;

use crate::config::Config;
use crate::repositories::{MongoProjectRepository, ProjectRepository};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Project storage, MongoDB in production
    pub projects: Arc<dyn ProjectRepository>,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState by connecting to MongoDB
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        let repository = MongoProjectRepository::connect(&config)
            .await
            .map_err(|e| AppStateError::Mongo(e.to_string()))?;

        Ok(Self::with_repository(config, Arc::new(repository)))
    }

    /// Create AppState with a custom repository (for testing)
    pub fn with_repository(config: Config, projects: Arc<dyn ProjectRepository>) -> Self {
        Self { projects, config }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("MongoDB connection error: {0}")]
    Mongo(String),
}
