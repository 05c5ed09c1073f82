use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use qrbox_core::ServiceError;

use super::AppState;
use crate::items_text::parse_item_lines;
use crate::pages;

/// Word the user must type to delete a box.
const DELETE_CONFIRMATION: &str = "DELETE";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/boxes", post(add_box))
        .route("/boxes/update", post(update_box))
        .route("/boxes/delete", post(delete_box))
        .route("/boxes/{id}", get(box_admin))
        .route("/b/{id}", get(box_public))
}

#[derive(Deserialize)]
struct AddBoxForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    location: String,
    /// Free-text item list, one per line.
    #[serde(default)]
    items: String,
    pin: Option<String>,
}

#[derive(Deserialize)]
struct UpdateBoxForm {
    #[serde(default)]
    box_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    location: String,
    pin: Option<String>,
}

#[derive(Deserialize)]
struct DeleteBoxForm {
    #[serde(default)]
    box_id: String,
    #[serde(default)]
    confirm: String,
    pin: Option<String>,
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, ServiceError> {
    let boxes = state.store.list_boxes()?;
    Ok(Html(pages::index(&boxes, state.auth.pin_required())))
}

async fn add_box(
    State(state): State<AppState>,
    Form(form): Form<AddBoxForm>,
) -> Result<Redirect, ServiceError> {
    state.auth.check(form.pin.as_deref())?;
    let items = parse_item_lines(&form.items);
    state.store.add_box(&form.name, &form.location, items)?;
    Ok(Redirect::to("/"))
}

async fn box_public(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ServiceError> {
    let b = state.store.get_box(&id)?;
    Ok(Html(pages::box_public(&b)))
}

async fn box_admin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ServiceError> {
    let b = state.store.get_box(&id)?;
    Ok(Html(pages::box_admin(&b, state.auth.pin_required())))
}

async fn update_box(
    State(state): State<AppState>,
    Form(form): Form<UpdateBoxForm>,
) -> Result<Redirect, ServiceError> {
    state.auth.check(form.pin.as_deref())?;
    let b = state.store.update_box(&form.box_id, &form.name, &form.location)?;
    Ok(Redirect::to(&format!("/boxes/{}", b.id)))
}

async fn delete_box(
    State(state): State<AppState>,
    Form(form): Form<DeleteBoxForm>,
) -> Result<Redirect, ServiceError> {
    state.auth.check(form.pin.as_deref())?;
    if !form.confirm.trim().eq_ignore_ascii_case(DELETE_CONFIRMATION) {
        return Err(ServiceError::Validation(format!(
            "Type \"{DELETE_CONFIRMATION}\" to confirm"
        )));
    }
    state.store.delete_box(&form.box_id)?;
    Ok(Redirect::to("/"))
}
