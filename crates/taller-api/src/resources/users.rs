// User-account endpoints
//
// Login and the current-user lookup live in `auth`; this module covers
// account administration.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{PasswordChange, StatusPatch};

pub const USERS: &str = "api/Usuario";

impl ApiClient {
    /// `PATCH api/Usuario/{id}/status` with `{"activo": bool}`
    pub async fn set_user_status(&self, id: i64, activo: bool) -> Result<(), Error> {
        debug!(id, activo, "setting user status");
        let _: serde_json::Value = self
            .patch(&format!("{USERS}/{id}/status"), &StatusPatch { activo })
            .await?;
        Ok(())
    }

    /// `PUT api/Usuario/{id}/password`
    pub async fn set_user_password(&self, id: i64, password: &SecretString) -> Result<(), Error> {
        debug!(id, "changing user password");
        let body = PasswordChange {
            contrasena: password.expose_secret().to_owned(),
        };
        let _: serde_json::Value = self.put(&format!("{USERS}/{id}/password"), &body).await?;
        Ok(())
    }
}
