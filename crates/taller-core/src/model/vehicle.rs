// ── Vehicle domain type ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// A customer vehicle registered in the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: EntityId,
    /// Owning user account.
    pub owner_id: Option<EntityId>,
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub plate: String,
    pub color: Option<String>,
    /// Body type (sedan, pickup, ...), free text.
    pub kind: Option<String>,
}

impl Vehicle {
    /// `"Toyota Corolla (ABC-123)"`, the label used in history listings.
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.make, self.model, self.plate)
    }
}
