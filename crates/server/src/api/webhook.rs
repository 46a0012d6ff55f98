//! Plex webhook ingestion.
//!
//! Plex POSTs `multipart/form-data` with a JSON `payload` field and, for
//! some events, a `thumb` image. Urlencoded forms are accepted too. The
//! response status only reflects whether a payload could be decoded; what
//! the sensors make of it never changes it.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::FormRejection;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::Form;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::state::AppState;

const PAYLOAD_FIELD: &str = "payload";

#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    #[error("multipart body rejected: {0}")]
    Multipart(#[from] MultipartRejection),

    #[error("multipart field unreadable: {0}")]
    Field(#[from] MultipartError),

    #[error("form body rejected: {0}")]
    Form(#[from] FormRejection),
}

/// POST /: decode `payload` and hand it to the sensors.
pub async fn webhook(State(state): State<Arc<AppState>>, request: Request) -> StatusCode {
    let raw = match payload_field(request).await {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => {
            warn!("Received POST without payload field.");
            return StatusCode::BAD_REQUEST;
        }
        Err(e) => {
            warn!(error = %e, "Received POST with unreadable body.");
            return StatusCode::BAD_REQUEST;
        }
    };

    debug!("Raw Plex Payload: {}", raw);

    let payload: Value = match serde_json::from_str(&raw) {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, "Failed to parse Plex payload JSON");
            return StatusCode::BAD_REQUEST;
        }
    };

    let changed = state.handle_payload(&payload).await;
    debug!(changed, "webhook handled");

    StatusCode::OK
}

/// Extract the `payload` form field, draining any other parts.
async fn payload_field(request: Request) -> Result<Option<String>, BodyError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("multipart/form-data"))
        .unwrap_or(false);

    if is_multipart {
        let mut multipart = Multipart::from_request(request, &()).await?;
        let mut payload = None;
        while let Some(field) = multipart.next_field().await? {
            if field.name() == Some(PAYLOAD_FIELD) {
                payload = Some(field.text().await?);
            } else {
                field.bytes().await?;
            }
        }
        Ok(payload)
    } else {
        let Form(mut fields) = Form::<HashMap<String, String>>::from_request(request, &()).await?;
        Ok(fields.remove(PAYLOAD_FIELD))
    }
}
