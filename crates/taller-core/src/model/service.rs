// ── Service-catalog domain type ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// A billable shop service (oil change, alignment, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub cost: f64,
    /// Estimated duration. `None` when the backend label had no number.
    pub duration_minutes: Option<u32>,
    pub active: bool,
}
