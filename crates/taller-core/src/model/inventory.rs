// ── Inventory domain types ──

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// Stock level relative to an item's reorder point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    OutOfStock,
    Low,
    InStock,
}

impl StockStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::OutOfStock => "Agotado",
            Self::Low => "Bajo Stock",
            Self::InStock => "En Stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A stocked part or consumable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: EntityId,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub unit: String,
    /// Reorder point: at or below this the item counts as low.
    pub min_quantity: i64,
    pub supplier: Option<String>,
    pub price: Option<f64>,
}

impl InventoryItem {
    pub fn stock_status(&self) -> StockStatus {
        if self.quantity <= 0 {
            StockStatus::OutOfStock
        } else if self.quantity <= self.min_quantity {
            StockStatus::Low
        } else {
            StockStatus::InStock
        }
    }

    /// Low or out of stock.
    pub fn needs_restock(&self) -> bool {
        self.stock_status() != StockStatus::InStock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, min_quantity: i64) -> InventoryItem {
        InventoryItem {
            id: EntityId::new(1),
            name: "Aceite 5W-30".into(),
            category: "Lubricantes".into(),
            quantity,
            unit: "Litro".into(),
            min_quantity,
            supplier: None,
            price: Some(45.0),
        }
    }

    #[test]
    fn stock_status_thresholds() {
        assert_eq!(item(0, 5).stock_status(), StockStatus::OutOfStock);
        assert_eq!(item(5, 5).stock_status(), StockStatus::Low);
        assert_eq!(item(6, 5).stock_status(), StockStatus::InStock);
        assert!(item(2, 5).needs_restock());
    }
}
