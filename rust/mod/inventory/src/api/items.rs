use axum::extract::State;
use axum::response::Redirect;
use axum::routing::post;
use axum::{Form, Router};
use serde::Deserialize;

use qrbox_core::ServiceError;

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", post(add_item))
        .route("/items/update", post(update_item))
        .route("/items/delete", post(delete_item))
}

// Quantities and indexes arrive as raw strings: a bad quantity becomes 1
// and a bad index is "not found", instead of a form rejection.

#[derive(Deserialize)]
struct AddItemForm {
    #[serde(default)]
    box_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    qty: String,
    pin: Option<String>,
}

#[derive(Deserialize)]
struct UpdateItemForm {
    #[serde(default)]
    box_id: String,
    #[serde(default)]
    idx: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    qty: String,
    pin: Option<String>,
}

#[derive(Deserialize)]
struct DeleteItemForm {
    #[serde(default)]
    box_id: String,
    #[serde(default)]
    idx: String,
    pin: Option<String>,
}

fn parse_index(box_id: &str, raw: &str) -> Result<usize, ServiceError> {
    raw.trim().parse().map_err(|_| {
        ServiceError::NotFound(format!("item #{} not found in box '{}'", raw.trim(), box_id))
    })
}

fn edit_page(box_id: &str) -> Redirect {
    Redirect::to(&format!("/boxes/{box_id}"))
}

async fn add_item(
    State(state): State<AppState>,
    Form(form): Form<AddItemForm>,
) -> Result<Redirect, ServiceError> {
    state.auth.check(form.pin.as_deref())?;
    state.store.add_item(&form.box_id, &form.name, &form.qty)?;
    Ok(edit_page(&form.box_id))
}

async fn update_item(
    State(state): State<AppState>,
    Form(form): Form<UpdateItemForm>,
) -> Result<Redirect, ServiceError> {
    state.auth.check(form.pin.as_deref())?;
    let index = parse_index(&form.box_id, &form.idx)?;
    state.store.update_item(&form.box_id, index, &form.name, &form.qty)?;
    Ok(edit_page(&form.box_id))
}

async fn delete_item(
    State(state): State<AppState>,
    Form(form): Form<DeleteItemForm>,
) -> Result<Redirect, ServiceError> {
    state.auth.check(form.pin.as_deref())?;
    let index = parse_index(&form.box_id, &form.idx)?;
    state.store.delete_item(&form.box_id, index)?;
    Ok(edit_page(&form.box_id))
}
