// Work-order endpoints
//
// Orders carry a `details` sub-resource (service lines) with its own CRUD.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{OrderDetailPayload, OrderDetailRecord};

use super::written;

pub const ORDERS: &str = "api/Orden";

impl ApiClient {
    /// `GET api/Orden/{id}/details`
    pub async fn order_details(&self, order_id: i64) -> Result<Vec<OrderDetailRecord>, Error> {
        self.get(&format!("{ORDERS}/{order_id}/details")).await
    }

    /// `POST api/Orden/{id}/details`
    pub async fn add_order_detail(
        &self,
        order_id: i64,
        detail: &OrderDetailPayload,
    ) -> Result<Option<OrderDetailRecord>, Error> {
        debug!(order_id, service = detail.id_servicio, "adding order detail");
        let value: serde_json::Value = self
            .post(&format!("{ORDERS}/{order_id}/details"), detail)
            .await?;
        Ok(written(value))
    }

    /// `PUT api/Orden/{id}/details/{detailId}`
    pub async fn update_order_detail(
        &self,
        order_id: i64,
        detail_id: i64,
        detail: &OrderDetailPayload,
    ) -> Result<Option<OrderDetailRecord>, Error> {
        debug!(order_id, detail_id, "updating order detail");
        let value: serde_json::Value = self
            .put(&format!("{ORDERS}/{order_id}/details/{detail_id}"), detail)
            .await?;
        Ok(written(value))
    }

    /// `DELETE api/Orden/{id}/details/{detailId}`
    pub async fn remove_order_detail(&self, order_id: i64, detail_id: i64) -> Result<(), Error> {
        debug!(order_id, detail_id, "removing order detail");
        self.delete(&format!("{ORDERS}/{order_id}/details/{detail_id}"))
            .await
    }
}
