// Service-catalog endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ServiceRecord, StatusPatch};

pub const SERVICES: &str = "api/Servicio";

impl ApiClient {
    /// Enable or disable a service without touching its other fields.
    ///
    /// `PATCH api/Servicio/{id}/status` with `{"activo": bool}`
    pub async fn set_service_status(&self, id: i64, activo: bool) -> Result<(), Error> {
        debug!(id, activo, "setting service status");
        let _: serde_json::Value = self
            .patch(&format!("{SERVICES}/{id}/status"), &StatusPatch { activo })
            .await?;
        Ok(())
    }

    /// `GET api/Servicio/categories`
    pub async fn service_categories(&self) -> Result<Vec<String>, Error> {
        self.get(&format!("{SERVICES}/categories")).await
    }

    /// Services applicable to (or performed on) a vehicle.
    ///
    /// `GET api/Servicio/vehicle/{vehicleId}`
    pub async fn services_for_vehicle(&self, vehicle_id: i64) -> Result<Vec<ServiceRecord>, Error> {
        self.get(&format!("{SERVICES}/vehicle/{vehicle_id}")).await
    }
}
