use async_trait::async_trait;
use bson::oid::ObjectId;

use portfolio_api::error::{StoreError, StoreResult};
use portfolio_api::models::{CreateProject, Project, ProjectPatch};
use portfolio_api::repositories::ProjectRepository;

pub const STORE_FAILURE: &str = "store unavailable";

/// Repository whose every call fails, for exercising error mapping
pub struct FailingProjectRepository;

fn failure<T>() -> StoreResult<T> {
    Err(StoreError::Malformed(STORE_FAILURE.to_string()))
}

#[async_trait]
impl ProjectRepository for FailingProjectRepository {
    async fn list(&self) -> StoreResult<Vec<Project>> {
        failure()
    }

    async fn find_by_id(&self, _id: ObjectId) -> StoreResult<Option<Project>> {
        failure()
    }

    async fn create(&self, _input: CreateProject) -> StoreResult<Project> {
        failure()
    }

    async fn update(&self, _id: ObjectId, _patch: ProjectPatch) -> StoreResult<Option<Project>> {
        failure()
    }

    async fn delete(&self, _id: ObjectId) -> StoreResult<bool> {
        failure()
    }
}
