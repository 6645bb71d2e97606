use std::sync::Arc;

use async_trait::async_trait;
use bson::{oid::ObjectId, DateTime, Document};
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::models::{fields, CreateProject, Project, ProjectPatch};
use crate::repositories::ProjectRepository;

/// In-memory project storage for tests and local runs without MongoDB
#[derive(Clone, Default)]
pub struct InMemoryProjectRepository {
    documents: Arc<RwLock<Vec<Document>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

fn has_id(doc: &Document, id: &ObjectId) -> bool {
    doc.get_object_id(fields::ID).is_ok_and(|stored| stored == *id)
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn list(&self) -> StoreResult<Vec<Project>> {
        let mut docs = self.documents.read().await.clone();

        // Sort by createdAt descending, documents without one last
        docs.sort_by(|a, b| {
            b.get_datetime(fields::CREATED_AT)
                .ok()
                .cmp(&a.get_datetime(fields::CREATED_AT).ok())
        });

        docs.into_iter().map(Project::from_document).collect()
    }

    async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<Project>> {
        let docs = self.documents.read().await;
        docs.iter()
            .find(|doc| has_id(doc, &id))
            .cloned()
            .map(Project::from_document)
            .transpose()
    }

    async fn create(&self, input: CreateProject) -> StoreResult<Project> {
        let id = ObjectId::new();
        let mut doc = input.into_document(DateTime::now());
        doc.insert(fields::ID, id);

        self.documents.write().await.push(doc.clone());
        tracing::debug!(project_id = %id, "Inserted project");

        Project::from_document(doc)
    }

    async fn update(&self, id: ObjectId, patch: ProjectPatch) -> StoreResult<Option<Project>> {
        let mut docs = self.documents.write().await;
        let Some(doc) = docs.iter_mut().find(|doc| has_id(doc, &id)) else {
            return Ok(None);
        };

        for (key, value) in patch.set {
            doc.insert(key, value);
        }

        Project::from_document(doc.clone()).map(Some)
    }

    async fn delete(&self, id: ObjectId) -> StoreResult<bool> {
        let mut docs = self.documents.write().await;
        let before = docs.len();
        docs.retain(|doc| !has_id(doc, &id));

        Ok(docs.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    fn input(title: &str) -> CreateProject {
        CreateProject::new(
            Some(json!(title)),
            Some(json!("A test project")),
            Some(json!("Rust, Axum")),
            BTreeMap::new(),
        )
        .unwrap()
    }

    fn patch(value: serde_json::Value) -> ProjectPatch {
        ProjectPatch::from_fields(serde_json::from_value(value).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryProjectRepository::new();

        let created = repo.create(input("First")).await.unwrap();
        assert!(created.created_at.is_some());
        assert_eq!(created.technologies, Some(vec!["Rust".to_string(), "Axum".to_string()]));

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_find_missing() {
        let repo = InMemoryProjectRepository::new();
        assert!(repo.find_by_id(ObjectId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryProjectRepository::new();

        for title in ["one", "two", "three"] {
            repo.create(input(title)).await.unwrap();
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let titles: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .filter_map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["three", "two", "one"]);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let repo = InMemoryProjectRepository::new();
        let created = repo.create(input("Original")).await.unwrap();

        let updated = repo
            .update(created.id, patch(json!({ "description": "new", "stars": 5 })))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title.as_deref(), Some("Original"));
        assert_eq!(updated.description.as_deref(), Some("new"));
        assert_eq!(updated.technologies, created.technologies);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.extra.get_i64("stars").unwrap(), 5);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let repo = InMemoryProjectRepository::new();
        let result = repo
            .update(ObjectId::new(), patch(json!({ "title": "x" })))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryProjectRepository::new();
        let created = repo.create(input("Doomed")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.is_empty().await);
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
