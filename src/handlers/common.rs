use axum::{extract::rejection::JsonRejection, Json};
use serde::Serialize;
use utoipa::ToSchema;

/// Plain `{ "message": ... }` acknowledgement body
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Unwrap a JSON body. A request without a JSON content type reads as an empty
/// object; any other rejection is passed back.
pub fn body_or_default<T: Default>(
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, JsonRejection> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(rejection),
    }
}
