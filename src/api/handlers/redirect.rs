//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short ID to its destination.
///
/// # Endpoint
///
/// `GET /{id}`
///
/// # Response Codes
///
/// - **301 Moved Permanently**: `Location` carries the destination
/// - **404 Not Found**, empty body: unknown ID
/// - **404 Not Found**, plaintext body: no link was ever stored
///
/// # Errors
///
/// Returns 500 Internal Server Error if the store read fails or the stored
/// destination cannot be sent as a header.
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let destination = state.link_service.resolve(&id).await?;

    let location = HeaderValue::from_str(&destination).map_err(|e| {
        AppError::Internal(format!("stored destination for {} is not a header value: {}", id, e))
    })?;

    debug!(id = %id, "Redirecting");

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}
