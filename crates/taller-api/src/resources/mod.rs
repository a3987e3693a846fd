// Resource endpoint groups
//
// Every entity is exposed under `api/<Entity>` with the same five verbs.
// The generic helpers here implement those verbs once; each submodule adds
// its endpoint constant and whatever extra routes that entity has.

pub mod employees;
pub mod inventory;
pub mod orders;
pub mod payments;
pub mod roles;
pub mod services;
pub mod users;
pub mod vehicles;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::error::Error;

pub use employees::EMPLOYEES;
pub use inventory::INVENTORY;
pub use orders::ORDERS;
pub use payments::PAYMENTS;
pub use roles::ROLES;
pub use services::SERVICES;
pub use users::USERS;
pub use vehicles::VEHICLES;

/// Decode an optional write response.
///
/// Create and update answer with the stored record, an empty body, or a
/// bare acknowledgement depending on the controller action. Anything that
/// isn't the record is reported as `None`; callers refetch anyway.
fn written<T: DeserializeOwned>(value: serde_json::Value) -> Option<T> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(error = %e, "write response is not a record; ignoring body");
            None
        }
    }
}

impl ApiClient {
    /// `GET {endpoint}?k=v...`
    ///
    /// `params` become the query string; an empty slice sends none.
    pub async fn list_records<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<Vec<T>, Error> {
        debug!(endpoint, "listing records");
        self.get_with_params(endpoint, params).await
    }

    /// `GET {endpoint}/{id}`
    pub async fn get_record<T: DeserializeOwned>(&self, endpoint: &str, id: i64) -> Result<T, Error> {
        self.get(&format!("{endpoint}/{id}")).await
    }

    /// `POST {endpoint}`
    pub async fn create_record<T, B>(&self, endpoint: &str, body: &B) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        debug!(endpoint, "creating record");
        let value: serde_json::Value = self.post(endpoint, body).await?;
        Ok(written(value))
    }

    /// `PUT {endpoint}/{id}`
    pub async fn update_record<T, B>(
        &self,
        endpoint: &str,
        id: i64,
        body: &B,
    ) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        debug!(endpoint, id, "updating record");
        let value: serde_json::Value = self.put(&format!("{endpoint}/{id}"), body).await?;
        Ok(written(value))
    }

    /// `DELETE {endpoint}/{id}`
    pub async fn delete_record(&self, endpoint: &str, id: i64) -> Result<(), Error> {
        debug!(endpoint, id, "deleting record");
        self.delete(&format!("{endpoint}/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleRecord;
    use serde_json::json;

    #[test]
    fn written_accepts_record_and_ignores_acknowledgements() {
        let rec: Option<VehicleRecord> = written(json!({"idVehiculo": 4, "marca": "Mazda"}));
        assert_eq!(rec.map(|r| r.id_vehiculo), Some(4));

        let ack: Option<VehicleRecord> = written(json!({"message": "Actualizado"}));
        assert!(ack.is_none());

        let empty: Option<VehicleRecord> = written(serde_json::Value::Null);
        assert!(empty.is_none());
    }
}
