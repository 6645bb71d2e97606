use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult, ResultExt};
use crate::handlers::{body_or_default, MessageResponse};
use crate::models::{CreateProject, Project, ProjectPatch};
use crate::state::AppState;

const FETCH_FAILED: &str = "Error fetching projects";
const INVALID_ID: &str = "Invalid Project ID format";
const CREATE_FAILED: &str = "Error creating project (DB Issue)";
const INVALID_BODY: &str = "Invalid request body";
const UPDATE_FAILED: &str = "Error updating project";
const DELETE_FAILED: &str = "Invalid ID or DB error";

// ============ Request/Response DTOs ============

/// Any value other than `null`, `false`, `0` or `""` counts as present for
/// `title` and `description`
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    #[schema(value_type = String)]
    pub title: Option<Value>,
    #[schema(value_type = String)]
    pub description: Option<Value>,
    /// A list of technologies, or one comma-separated string
    #[schema(value_type = Vec<String>)]
    pub technologies: Option<Value>,
    /// Any other fields are stored as submitted
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Fields to replace or add; fields not mentioned are left untouched
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProjectRequest {
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    /// RFC 3339 timestamp
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id.to_hex(),
            title: p.title,
            description: p.description,
            technologies: p.technologies,
            created_at: p
                .created_at
                .map(|dt| dt.try_to_rfc3339_string().unwrap_or_else(|_| dt.to_string())),
            extra: p
                .extra
                .into_iter()
                .map(|(key, value)| (key, value.into_relaxed_extjson()))
                .collect(),
        }
    }
}

// ============ Handlers ============

/// List all projects, newest first
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "List of projects", body = Vec<ProjectResponse>),
        (status = 500, description = "Store error")
    ),
    tag = "Projects"
)]
pub async fn list_projects(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProjectResponse>>> {
    let projects = state.projects.list().await.internal(FETCH_FAILED)?;

    Ok(Json(projects.into_iter().map(|p| p.into()).collect()))
}

/// Get a project by ID
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(
        ("id" = String, Path, description = "Project ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Project details", body = ProjectResponse),
        (status = 400, description = "Malformed project ID"),
        (status = 404, description = "Project not found")
    ),
    tag = "Projects"
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProjectResponse>> {
    let id = ObjectId::parse_str(&id).bad_request(INVALID_ID)?;

    let project = state
        .projects
        .find_by_id(id)
        .await
        .bad_request(INVALID_ID)?
        .ok_or(AppError::NotFound("Project"))?;

    Ok(Json(project.into()))
}

/// Create a new project
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created successfully", body = ProjectResponse),
        (status = 400, description = "Missing title, description or technologies, or a body that is not a JSON object"),
        (status = 500, description = "Store error")
    ),
    tag = "Projects"
)]
pub async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ProjectResponse>)> {
    let payload = body_or_default(payload).bad_request(INVALID_BODY)?;
    let create_project = CreateProject::new(
        payload.title,
        payload.description,
        payload.technologies,
        payload.extra,
    )?;

    let project = state
        .projects
        .create(create_project)
        .await
        .internal(CREATE_FAILED)?;
    tracing::info!(project_id = %project.id, "Project created");

    Ok((StatusCode::CREATED, Json(project.into())))
}

/// Update a project
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(
        ("id" = String, Path, description = "Project ID (24 hex characters)")
    ),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated successfully", body = ProjectResponse),
        (status = 400, description = "Malformed project ID or store error"),
        (status = 404, description = "Project not found")
    ),
    tag = "Projects"
)]
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProjectRequest>, JsonRejection>,
) -> AppResult<Json<ProjectResponse>> {
    let id = ObjectId::parse_str(&id).bad_request(UPDATE_FAILED)?;
    let Json(payload) = payload.bad_request(UPDATE_FAILED)?;
    let patch = ProjectPatch::from_fields(payload.fields).bad_request(UPDATE_FAILED)?;

    let project = state
        .projects
        .update(id, patch)
        .await
        .bad_request(UPDATE_FAILED)?
        .ok_or(AppError::NotFound("Project"))?;
    tracing::info!(project_id = %id, "Project updated");

    Ok(Json(project.into()))
}

/// Delete a project
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(
        ("id" = String, Path, description = "Project ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Project deleted successfully", body = MessageResponse),
        (status = 400, description = "Malformed project ID or store error"),
        (status = 404, description = "Project not found")
    ),
    tag = "Projects"
)]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = ObjectId::parse_str(&id).bad_request(DELETE_FAILED)?;

    if !state.projects.delete(id).await.bad_request(DELETE_FAILED)? {
        return Err(AppError::NotFound("Project"));
    }
    tracing::info!(project_id = %id, "Project deleted");

    Ok(Json(MessageResponse::new("Project deleted successfully")))
}
