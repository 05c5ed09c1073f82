pub mod api;
pub mod items_text;
pub mod model;
pub mod pages;
pub mod store;

use std::sync::Arc;

use axum::Router;
use qrbox_core::{Authenticator, Module};

use api::AppState;
use store::InventoryStore;

/// Inventory module: storage boxes, their items, and printable codes.
pub struct InventoryModule {
    state: AppState,
}

impl InventoryModule {
    pub fn new(
        store: Arc<dyn InventoryStore>,
        auth: Arc<dyn Authenticator>,
        base_url: &str,
    ) -> Self {
        Self {
            state: AppState {
                store,
                auth,
                base_url: Arc::from(base_url.trim_end_matches('/')),
            },
        }
    }
}

impl Module for InventoryModule {
    fn name(&self) -> &str {
        "inventory"
    }

    fn routes(&self) -> Router {
        api::router(self.state.clone())
    }
}
