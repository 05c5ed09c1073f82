use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use qrbox_core::ServiceError;

use super::normalize_qty_value;

/// Item: a named, quantified thing stored inside a box.
///
/// Items have no id of their own; they are addressed by position within
/// their box.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub name: String,

    /// Always ≥ 1. Stored values below 1 read back as 1.
    #[serde(default = "default_qty", deserialize_with = "deserialize_qty")]
    pub qty: u32,
}

fn default_qty() -> u32 {
    1
}

fn deserialize_qty<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(normalize_qty_value)
}

impl Item {
    pub fn new(name: impl Into<String>, qty: u32) -> Self {
        Self {
            name: name.into(),
            qty,
        }
    }
}

/// StorageBox: a physical container with a printed QR label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageBox {
    /// Stable identifier, also the path segment of the public link.
    pub id: String,

    pub name: String,

    /// Free-form hint such as "Garage - Shelf A2". May be empty.
    #[serde(default)]
    pub location: String,

    /// Display order is insertion order.
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Document: the complete persisted state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub boxes: Vec<StorageBox>,
}

impl Document {
    pub fn find(&self, id: &str) -> Option<&StorageBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut StorageBox> {
        self.boxes.iter_mut().find(|b| b.id == id)
    }

    /// Check the structural rules a stored document must satisfy:
    /// non-empty unique ids usable as a URL path segment, and non-empty
    /// trimmed names. Quantities are normalized when the document is read.
    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut seen = HashSet::with_capacity(self.boxes.len());
        for (i, b) in self.boxes.iter().enumerate() {
            if b.id.trim().is_empty() {
                return Err(ServiceError::Validation(format!("box #{} has an empty id", i + 1)));
            }
            if b.id.chars().any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#')) {
                return Err(ServiceError::Validation(format!(
                    "box id '{}' must not contain whitespace, '/', '?' or '#'",
                    b.id
                )));
            }
            if !seen.insert(b.id.as_str()) {
                return Err(ServiceError::Validation(format!("duplicate box id '{}'", b.id)));
            }
            if b.name.trim().is_empty() {
                return Err(ServiceError::Validation(format!("box '{}' has an empty name", b.id)));
            }
            for (j, item) in b.items.iter().enumerate() {
                if item.name.trim().is_empty() {
                    return Err(ServiceError::Validation(format!(
                        "item #{} of box '{}' has an empty name",
                        j + 1,
                        b.id
                    )));
                }
            }
        }
        Ok(())
    }
}
