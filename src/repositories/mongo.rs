use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson, DateTime, Document};
use futures::TryStreamExt;
use mongodb::{
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::models::{fields, CreateProject, Project, ProjectPatch};
use crate::repositories::ProjectRepository;

/// MongoDB-backed project storage
#[derive(Clone)]
pub struct MongoProjectRepository {
    collection: Collection<Document>,
}

impl MongoProjectRepository {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    /// Connect to the deployment and verify it answers a ping before serving anything
    pub async fn connect(config: &Config) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(&config.mongodb_url).await?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());

        let client = Client::with_options(options)?;
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        tracing::info!("Pinged MongoDB deployment");

        let collection = client
            .database(&config.mongodb_database)
            .collection::<Document>(&config.mongodb_collection);

        Ok(Self::new(collection))
    }
}

#[async_trait]
impl ProjectRepository for MongoProjectRepository {
    async fn list(&self) -> StoreResult<Vec<Project>> {
        let docs: Vec<Document> = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;

        docs.into_iter().map(Project::from_document).collect()
    }

    async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<Project>> {
        self.collection
            .find_one(doc! { "_id": id })
            .await?
            .map(Project::from_document)
            .transpose()
    }

    async fn create(&self, input: CreateProject) -> StoreResult<Project> {
        let mut doc = input.into_document(DateTime::now());

        let result = self.collection.insert_one(&doc).await?;
        let id = match result.inserted_id {
            Bson::ObjectId(id) => id,
            other => {
                return Err(StoreError::Malformed(format!(
                    "inserted project has a non-ObjectId _id: {}",
                    other
                )))
            }
        };
        tracing::debug!(project_id = %id, "Inserted project");

        doc.insert(fields::ID, id);
        Project::from_document(doc)
    }

    async fn update(&self, id: ObjectId, patch: ProjectPatch) -> StoreResult<Option<Project>> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": patch.set })
            .await?;

        if result.matched_count == 0 {
            return Ok(None);
        }
        tracing::debug!(project_id = %id, "Updated project");

        self.find_by_id(id).await
    }

    async fn delete(&self, id: ObjectId) -> StoreResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        Ok(result.deleted_count > 0)
    }
}
