// ── Employee domain type ──

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    /// Second precision; the backend's fractional part is dropped.
    pub hired_at: Option<NaiveDateTime>,
    pub salary: f64,
    pub role_id: Option<EntityId>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
