use std::path::Path;

use tracing::info;

use qrbox_core::{new_id, ServiceError};
use qrbox_docstore::JsonFile;

use super::InventoryStore;
use crate::model::{normalize_qty, normalize_qty_value, validate_name, Document, Item, StorageBox};

/// FileInventory keeps the whole inventory in a single JSON file.
///
/// The file path and its lock belong to this instance; nothing is global.
pub struct FileInventory {
    file: JsonFile<Document>,
}

impl FileInventory {
    /// Bind to the document at `path`. The file is created on first write.
    pub fn open(path: &Path) -> Result<Self, ServiceError> {
        let file = JsonFile::open(path)?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Run a mutation on the box with `id` under the document lock.
    fn with_box<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut StorageBox) -> Result<R, ServiceError>,
    ) -> Result<R, ServiceError> {
        self.file.update(|doc| {
            let b = doc.find_mut(id).ok_or_else(|| box_not_found(id))?;
            f(b)
        })
    }
}

fn box_not_found(id: &str) -> ServiceError {
    ServiceError::NotFound(format!("box '{id}' not found"))
}

fn item_not_found(box_id: &str, index: usize) -> ServiceError {
    ServiceError::NotFound(format!("item #{index} not found in box '{box_id}'"))
}

impl InventoryStore for FileInventory {
    fn load(&self) -> Result<Document, ServiceError> {
        Ok(self.file.load()?)
    }

    fn save(&self, doc: &Document) -> Result<(), ServiceError> {
        doc.validate()?;
        Ok(self.file.save(doc)?)
    }

    fn list_boxes(&self) -> Result<Vec<StorageBox>, ServiceError> {
        Ok(self.load()?.boxes)
    }

    fn add_box(&self, name: &str, location: &str, items: Vec<Item>) -> Result<StorageBox, ServiceError> {
        let name = validate_name(name, "box name")?;
        let items = items
            .into_iter()
            .map(|item| {
                Ok(Item {
                    name: validate_name(&item.name, "item name")?,
                    qty: normalize_qty_value(i64::from(item.qty)),
                })
            })
            .collect::<Result<Vec<_>, ServiceError>>()?;

        let record = StorageBox {
            id: new_id(),
            name,
            location: location.trim().to_string(),
            items,
        };

        self.file.update(|doc| {
            doc.boxes.push(record.clone());
            Ok::<_, ServiceError>(())
        })?;

        info!(box_id = %record.id, items = record.items.len(), "created box '{}'", record.name);
        Ok(record)
    }

    fn get_box(&self, id: &str) -> Result<StorageBox, ServiceError> {
        self.load()?
            .boxes
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| box_not_found(id))
    }

    fn update_box(&self, id: &str, name: &str, location: &str) -> Result<StorageBox, ServiceError> {
        let name = validate_name(name, "box name")?;
        let location = location.trim().to_string();
        let updated = self.with_box(id, |b| {
            b.name = name;
            b.location = location;
            Ok(b.clone())
        })?;
        info!(box_id = %id, "updated box '{}'", updated.name);
        Ok(updated)
    }

    fn delete_box(&self, id: &str) -> Result<StorageBox, ServiceError> {
        let removed = self.file.update(|doc| {
            let pos = doc
                .boxes
                .iter()
                .position(|b| b.id == id)
                .ok_or_else(|| box_not_found(id))?;
            Ok::<_, ServiceError>(doc.boxes.remove(pos))
        })?;
        info!(box_id = %id, items = removed.items.len(), "deleted box '{}'", removed.name);
        Ok(removed)
    }

    fn add_item(&self, box_id: &str, name: &str, qty: &str) -> Result<StorageBox, ServiceError> {
        let item = Item::new(validate_name(name, "item name")?, normalize_qty(qty));
        let updated = self.with_box(box_id, |b| {
            b.items.push(item);
            Ok(b.clone())
        })?;
        info!(box_id = %box_id, count = updated.items.len(), "added item");
        Ok(updated)
    }

    fn update_item(
        &self,
        box_id: &str,
        index: usize,
        name: &str,
        qty: &str,
    ) -> Result<StorageBox, ServiceError> {
        let item = Item::new(validate_name(name, "item name")?, normalize_qty(qty));
        let updated = self.with_box(box_id, |b| {
            let slot = b.items.get_mut(index).ok_or_else(|| item_not_found(box_id, index))?;
            *slot = item;
            Ok(b.clone())
        })?;
        info!(box_id = %box_id, index, "updated item");
        Ok(updated)
    }

    fn delete_item(&self, box_id: &str, index: usize) -> Result<StorageBox, ServiceError> {
        let updated = self.with_box(box_id, |b| {
            if index >= b.items.len() {
                return Err(item_not_found(box_id, index));
            }
            b.items.remove(index);
            Ok(b.clone())
        })?;
        info!(box_id = %box_id, index, "deleted item");
        Ok(updated)
    }

    fn export_document(&self) -> Result<Document, ServiceError> {
        self.load()
    }

    fn import_document(&self, doc: Document) -> Result<(), ServiceError> {
        doc.validate()?;
        let count = doc.boxes.len();
        self.file.save(&doc)?;
        info!(boxes = count, "imported document");
        Ok(())
    }
}
