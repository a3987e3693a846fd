// ── User-account domain type ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// A login account. Passwords never leave the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub role_id: Option<EntityId>,
    pub employee_id: Option<EntityId>,
    pub active: bool,
}
