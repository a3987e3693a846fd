// ── Maintenance history ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;
use super::order::OrderStatus;

/// One past or scheduled job on a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceEntry {
    pub id: EntityId,
    pub vehicle: String,
    pub date: Option<NaiveDate>,
    pub kind: String,
    pub cost: Option<f64>,
    pub status: OrderStatus,
    pub details: Option<String>,
}

/// Narrowing of a maintenance history. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenanceFilter {
    /// Substring of the vehicle label.
    pub vehicle: Option<String>,
    pub status: Option<OrderStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl MaintenanceFilter {
    pub fn matches(&self, entry: &MaintenanceEntry) -> bool {
        self.vehicle
            .as_deref()
            .is_none_or(|v| entry.vehicle.contains(v))
            && self.status.as_ref().is_none_or(|s| *s == entry.status)
            && self
                .from
                .is_none_or(|from| entry.date.is_some_and(|d| d >= from))
            && self.to.is_none_or(|to| entry.date.is_some_and(|d| d <= to))
    }

    pub fn apply(&self, entries: Vec<MaintenanceEntry>) -> Vec<MaintenanceEntry> {
        entries.into_iter().filter(|e| self.matches(e)).collect()
    }
}
