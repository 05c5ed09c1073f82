mod file;

pub use file::FileInventory;

use qrbox_core::ServiceError;

use crate::model::{Document, Item, StorageBox};

/// InventoryStore is the only way callers read or change the inventory.
///
/// Every mutating call is one load → mutate → save unit: either the whole
/// change is persisted or the call fails before anything is written.
/// Items are addressed by position, so an index read from a page can
/// point at a different item if the box changed in between.
pub trait InventoryStore: Send + Sync {
    /// Read the whole document. A missing or empty backing file is an
    /// empty document; an unparseable one is `ServiceError::Corrupt`.
    fn load(&self) -> Result<Document, ServiceError>;

    /// Replace the whole document. Fails with `Validation` if it breaks
    /// the structural rules (see [`Document::validate`]).
    fn save(&self, doc: &Document) -> Result<(), ServiceError>;

    /// All boxes in display order.
    fn list_boxes(&self) -> Result<Vec<StorageBox>, ServiceError>;

    /// Create a box with a fresh id and append it.
    fn add_box(&self, name: &str, location: &str, items: Vec<Item>) -> Result<StorageBox, ServiceError>;

    fn get_box(&self, id: &str) -> Result<StorageBox, ServiceError>;

    /// Replace name and location; items are left alone.
    fn update_box(&self, id: &str, name: &str, location: &str) -> Result<StorageBox, ServiceError>;

    /// Remove a box with all its items. Deleting a missing box is
    /// `NotFound`, including a second delete of the same id.
    fn delete_box(&self, id: &str) -> Result<StorageBox, ServiceError>;

    /// Append an item. `qty` is the raw submitted value.
    fn add_item(&self, box_id: &str, name: &str, qty: &str) -> Result<StorageBox, ServiceError>;

    fn update_item(
        &self,
        box_id: &str,
        index: usize,
        name: &str,
        qty: &str,
    ) -> Result<StorageBox, ServiceError>;

    fn delete_item(&self, box_id: &str, index: usize) -> Result<StorageBox, ServiceError>;

    /// The document exactly as stored.
    fn export_document(&self) -> Result<Document, ServiceError>;

    /// Validate and replace the whole store. Nothing is written if the
    /// payload is rejected.
    fn import_document(&self, doc: Document) -> Result<(), ServiceError>;
}
