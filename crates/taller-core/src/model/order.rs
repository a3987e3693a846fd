// ── Work-order domain types ──

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

// ── OrderStatus ─────────────────────────────────────────────────────

/// Lifecycle state of a work order.
///
/// The backend stores the Spanish label verbatim; anything outside the
/// known set is kept as `Other` so it still round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    /// The known states, in workflow order.
    pub const ALL: [OrderStatus; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Wire label.
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Pendiente",
            Self::InProgress => "En Proceso",
            Self::Completed => "Completado",
            Self::Cancelled => "Cancelado",
            Self::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        Self::ALL
            .iter()
            .find(|known| known.label().eq_ignore_ascii_case(s.trim()))
            .cloned()
            .unwrap_or(Self::Other(s))
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.label().to_owned()
    }
}

impl FromStr for OrderStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

// ── Order ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: EntityId,
    pub vehicle_id: Option<EntityId>,
    pub employee_id: Option<EntityId>,
    pub service_id: Option<EntityId>,
    pub entered_on: Option<NaiveDate>,
    pub left_on: Option<NaiveDate>,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub description: Option<String>,
}

impl Order {
    /// Every displayed value, for free-text search.
    fn search_haystack(&self) -> Vec<String> {
        let mut values = vec![self.id.to_string(), self.status.to_string()];
        values.extend(self.vehicle_id.map(|v| v.to_string()));
        values.extend(self.employee_id.map(|v| v.to_string()));
        values.extend(self.service_id.map(|v| v.to_string()));
        values.extend(self.entered_on.map(|d| d.to_string()));
        values.extend(self.left_on.map(|d| d.to_string()));
        values.extend(self.notes.clone());
        values.extend(self.description.clone());
        values
    }
}

/// One service line on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: EntityId,
    pub order_id: Option<EntityId>,
    pub service_id: Option<EntityId>,
    pub quantity: i64,
    pub unit_price: Option<f64>,
    pub subtotal: Option<f64>,
}

// ── OrderFilter ─────────────────────────────────────────────────────

/// Client-side narrowing of the order list.
///
/// `search` matches case-insensitively against every displayed value;
/// the date bounds are inclusive and apply to the intake date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl OrderFilter {
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().is_none_or(|s| s.trim().is_empty())
            && self.status.is_none()
            && self.from.is_none()
            && self.to.is_none()
    }

    pub fn matches(&self, order: &Order) -> bool {
        if let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            if !order
                .search_haystack()
                .iter()
                .any(|v| v.to_lowercase().contains(&term))
            {
                return false;
            }
        }
        if self.status.as_ref().is_some_and(|s| *s != order.status) {
            return false;
        }
        if let Some(from) = self.from {
            if order.entered_on.is_none_or(|d| d < from) {
                return false;
            }
        }
        if let Some(to) = self.to {
            if order.entered_on.is_none_or(|d| d > to) {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        orders.iter().filter(|o| self.matches(o)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: i64, status: OrderStatus, entered: &str, notes: &str) -> Order {
        Order {
            id: EntityId::new(id),
            vehicle_id: Some(EntityId::new(3)),
            employee_id: Some(EntityId::new(2)),
            service_id: None,
            entered_on: entered.parse().ok(),
            left_on: None,
            status,
            notes: Some(notes.into()),
            description: None,
        }
    }

    #[test]
    fn status_labels_round_trip() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::from(status.label().to_owned()), status);
        }
        assert_eq!(
            OrderStatus::from("Esperando repuestos".to_owned()),
            OrderStatus::Other("Esperando repuestos".into())
        );
    }

    #[test]
    fn filter_combines_search_status_and_dates() {
        let orders = vec![
            order(1, OrderStatus::Pending, "2024-03-01", "Ruido en frenos"),
            order(2, OrderStatus::Completed, "2024-03-10", "Cambio de aceite"),
            order(3, OrderStatus::Pending, "2024-04-02", "Frenos traseros"),
        ];

        let filter = OrderFilter {
            search: Some("FRENOS".into()),
            status: Some(OrderStatus::Pending),
            from: "2024-03-15".parse().ok(),
            to: None,
        };
        let ids: Vec<i64> = filter.apply(&orders).iter().map(|o| o.id.get()).collect();
        assert_eq!(ids, vec![3]);

        assert_eq!(OrderFilter::default().apply(&orders).len(), 3);
        assert!(OrderFilter::default().is_empty());
    }
}
