// Inventory endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{InventoryRecord, QuantityChange};

pub const INVENTORY: &str = "api/Inventario";

/// Threshold the backend applies when none is given.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

impl ApiClient {
    /// Set an item's on-hand quantity.
    ///
    /// `PUT api/Inventario/{id}/quantity` with `{"quantity": n}`
    pub async fn set_inventory_quantity(&self, id: i64, quantity: i64) -> Result<(), Error> {
        debug!(id, quantity, "setting inventory quantity");
        let _: serde_json::Value = self
            .put(&format!("{INVENTORY}/{id}/quantity"), &QuantityChange { quantity })
            .await?;
        Ok(())
    }

    /// Items at or under `threshold` units.
    ///
    /// `GET api/Inventario/low-stock?threshold=N`
    pub async fn low_stock(&self, threshold: i64) -> Result<Vec<InventoryRecord>, Error> {
        self.get_with_params(
            &format!("{INVENTORY}/low-stock"),
            &[("threshold", threshold.to_string())],
        )
        .await
    }

    /// `GET api/Inventario/categories`
    pub async fn inventory_categories(&self) -> Result<Vec<String>, Error> {
        self.get(&format!("{INVENTORY}/categories")).await
    }
}
