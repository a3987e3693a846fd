// Payment endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{PaymentPayload, PaymentRecord};

use super::written;

pub const PAYMENTS: &str = "api/Pago";

impl ApiClient {
    /// Payments registered against one order.
    ///
    /// `GET api/Pago/order/{orderId}`
    pub async fn payments_for_order(&self, order_id: i64) -> Result<Vec<PaymentRecord>, Error> {
        self.get(&format!("{PAYMENTS}/order/{order_id}")).await
    }

    /// Register and settle a payment in one step.
    ///
    /// `POST api/Pago/process`
    pub async fn process_payment(
        &self,
        payment: &PaymentPayload,
    ) -> Result<Option<PaymentRecord>, Error> {
        debug!(order = payment.id_orden, monto = payment.monto, "processing payment");
        let value: serde_json::Value = self.post(&format!("{PAYMENTS}/process"), payment).await?;
        Ok(written(value))
    }
}
