use std::collections::BTreeMap;

use bson::oid::ObjectId;
use serde_json::json;

use portfolio_api::models::{CreateProject, Project};
use portfolio_api::repositories::ProjectRepository;
use portfolio_api::state::AppState;

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a test project
    pub async fn create_project(&self) -> Project {
        self.create_project_with_title(&format!("Test Project {}", ObjectId::new()))
            .await
    }

    /// Create a test project with specific title
    pub async fn create_project_with_title(&self, title: &str) -> Project {
        let input = CreateProject::new(
            Some(json!(title)),
            Some(json!("Test project description")),
            Some(json!(["Rust", "Axum", "MongoDB"])),
            BTreeMap::from([("githubUrl".to_string(), json!("https://github.com/example"))]),
        )
        .unwrap();

        self.state.projects.create(input).await.unwrap()
    }
}
