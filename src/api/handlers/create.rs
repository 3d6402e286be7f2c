//! Handler for link creation endpoint.

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, CreateLinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a destination URL.
///
/// # Endpoint
///
/// `POST /`
///
/// The body is decoded as JSON whatever the `Content-Type` header says. Only
/// the first JSON value is read; anything after it is ignored.
///
/// # Request Body
///
/// ```json
/// { "destination": "https://example.com" }
/// ```
///
/// An `id` field, if present, is ignored. A missing destination is stored as
/// empty, which later resolves to `404`.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "id": "q3Zt_w==", "destination": "https://example.com" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request with a plaintext body if the JSON cannot be
/// decoded, the destination contains control characters, ID generation
/// fails or the store write fails. Nothing is persisted in these cases.
pub async fn create_link_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    let payload: CreateLinkRequest = serde_json::Deserializer::from_slice(&body)
        .into_iter::<CreateLinkRequest>()
        .next()
        .unwrap_or_else(|| Err(<serde_json::Error as serde::de::Error>::custom("empty body")))
        .map_err(|e| AppError::bad_request(format!("invalid JSON body: {}", e)))?;

    payload.validate()?;

    if payload.id.is_some() {
        tracing::debug!("Ignoring client-supplied id");
    }

    let link = state.link_service.create_link(payload.destination).await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}
