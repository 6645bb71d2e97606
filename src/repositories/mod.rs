pub mod memory;
pub mod mongo;

pub use memory::InMemoryProjectRepository;
pub use mongo::MongoProjectRepository;

use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::error::StoreResult;
use crate::models::{CreateProject, Project, ProjectPatch};

/// Storage backend for projects.
///
/// Every method is a single request against the store; atomicity of an
/// individual insert, update or delete is left to the backend.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// All projects, newest `createdAt` first
    async fn list(&self) -> StoreResult<Vec<Project>>;

    /// Find project by ID
    async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<Project>>;

    /// Stamp `createdAt`, insert, and return the stored project with its new ID
    async fn create(&self, input: CreateProject) -> StoreResult<Project>;

    /// Apply a field-level patch. `None` when no project has this ID.
    async fn update(&self, id: ObjectId, patch: ProjectPatch) -> StoreResult<Option<Project>>;

    /// Delete project by ID. `false` when no project has this ID.
    async fn delete(&self, id: ObjectId) -> StoreResult<bool>;
}
