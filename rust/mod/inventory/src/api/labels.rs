use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use qrbox_core::ServiceError;
use qrbox_label::{LabelStyle, DEFAULT_SIZE};

use super::AppState;
use crate::model::public_url;
use crate::pages;

/// Upper bound on the requested square-code size, in pixels.
const MAX_SIZE: u32 = 2000;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/labels", get(label_sheet))
        .route("/qr/{id}", get(qr_image))
}

#[derive(Deserialize)]
struct QrParams {
    style: Option<String>,
    size: Option<u32>,
}

async fn label_sheet(State(state): State<AppState>) -> Result<Html<String>, ServiceError> {
    let boxes = state.store.list_boxes()?;
    Ok(Html(pages::labels(&boxes)))
}

/// GET /qr/{id}?style=label|qr&size=N: image encoding the box's public link.
async fn qr_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<QrParams>,
) -> Result<Response, ServiceError> {
    let b = state.store.get_box(&id)?;
    let url = public_url(&state.base_url, &b.id);
    let style = LabelStyle::from_query(params.style.as_deref());
    let size = params.size.unwrap_or(DEFAULT_SIZE).min(MAX_SIZE);

    let image = qrbox_label::render(style, &b.name, &url, size)?;
    Ok(([(header::CONTENT_TYPE, image.content_type)], image.bytes).into_response())
}
