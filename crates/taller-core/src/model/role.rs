// ── Role domain type ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;
use crate::permissions::PermissionSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub permissions: PermissionSet,
}
