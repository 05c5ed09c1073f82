//! Whole-document export (download) and import (upload/replace).

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;

use qrbox_core::ServiceError;

use super::AppState;
use crate::model::Document;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/export", get(export))
        .route("/import", post(import))
}

async fn export(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let doc = state.store.export_document()?;
    let body = serde_json::to_vec_pretty(&doc).map_err(|e| ServiceError::Internal(e.to_string()))?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"boxes.json\""),
        ],
        body,
    )
        .into_response())
}

/// POST /import: multipart with a `file` part (the JSON document) and an
/// optional `pin` part.
async fn import(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, ServiceError> {
    let mut file = None;
    let mut pin = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::Validation(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ServiceError::Validation(e.to_string()))?;
                file = Some(data);
            }
            "pin" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ServiceError::Validation(e.to_string()))?;
                pin = Some(text);
            }
            _ => {}
        }
    }

    state.auth.check(pin.as_deref())?;

    let data = file.ok_or_else(|| ServiceError::Validation("missing upload field 'file'".into()))?;
    let doc: Document = serde_json::from_slice(&data).map_err(|e| {
        ServiceError::Validation(format!("Invalid JSON (expected {{\"boxes\": [...]}}): {e}"))
    })?;
    state.store.import_document(doc)?;
    Ok(Redirect::to("/"))
}
