use axum::{extract::rejection::JsonRejection, Json};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::{AppResult, ResultExt};
use crate::handlers::{body_or_default, MessageResponse};

const CONTACT_FAILED: &str = "Error processing contact form";

// ============ Request/Response DTOs ============

/// Contact form submission. Nothing is validated or stored.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ContactRequest {
    #[schema(value_type = Option<String>)]
    pub name: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub email: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub message: Option<Value>,
}

// ============ Handlers ============

/// Accept a contact form submission
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message acknowledged", body = MessageResponse),
        (status = 400, description = "Body is not a JSON object")
    ),
    tag = "Contact"
)]
pub async fn submit_contact(
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let payload = body_or_default(payload).bad_request(CONTACT_FAILED)?;

    tracing::info!(
        name = ?payload.name,
        email = ?payload.email,
        message = ?payload.message,
        "Contact form submission"
    );

    Ok(Json(MessageResponse::new("Message received successfully")))
}
