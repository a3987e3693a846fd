// Vehicle endpoints
//
// Plain CRUD plus the per-vehicle maintenance history.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::MaintenanceRecord;

pub const VEHICLES: &str = "api/Vehiculo";

impl ApiClient {
    /// Maintenance history for one vehicle.
    ///
    /// `GET api/Vehiculo/{id}/maintenance`
    pub async fn vehicle_maintenance(&self, id: i64) -> Result<Vec<MaintenanceRecord>, Error> {
        debug!(id, "fetching maintenance history");
        self.get(&format!("{VEHICLES}/{id}/maintenance")).await
    }
}
