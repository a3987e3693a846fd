// Token authentication
//
// The backend issues a bearer token from `POST /Usuario/login`. The token
// lives in a shared `TokenSlot` that the client reads on every request;
// only login and logout write it.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::UserRecord;

const LOGIN_PATH: &str = "Usuario/login";
const CURRENT_USER_PATH: &str = "Usuario/current";

// ── TokenSlot ────────────────────────────────────────────────────────

/// Process-wide holder for the session's bearer token.
///
/// Cheap to clone; every clone observes the same slot. Reads are
/// lock-free so the HTTP client can consult it on every request.
#[derive(Debug, Clone, Default)]
pub struct TokenSlot {
    inner: Arc<ArcSwapOption<SecretString>>,
}

impl TokenSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a token, replacing any previous one.
    pub fn set(&self, token: SecretString) {
        self.inner.store(Some(Arc::new(token)));
    }

    /// Drop the stored token.
    pub fn clear(&self) {
        self.inner.store(None);
    }

    /// The current token, if any.
    pub fn get(&self) -> Option<Arc<SecretString>> {
        self.inner.load_full()
    }

    pub fn is_set(&self) -> bool {
        self.inner.load().is_some()
    }
}

// ── Login wire types ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    nombre_usuario: &'a str,
    contrasena: &'a str,
}

/// Body returned by a successful login.
///
/// Only `token` is guaranteed; some backend builds also embed the user
/// and the role's permission JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub usuario: Option<UserRecord>,
    #[serde(default)]
    pub permisos: Option<serde_json::Value>,
}

impl ApiClient {
    /// Authenticate with username/password.
    ///
    /// On success the returned token is stored in the client's
    /// [`TokenSlot`] and attached to every subsequent request.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, Error> {
        let url = self.url(LOGIN_PATH)?;
        debug!("logging in at {}", url);

        let body = LoginRequest {
            nombre_usuario: username,
            contrasena: password.expose_secret(),
        };

        let resp = self
            .http()
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let raw = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: crate::client::backend_message(&raw)
                    .unwrap_or_else(|| format!("login failed (HTTP {status})")),
            });
        }

        let raw = resp.text().await.map_err(|e| self.transport_error(e))?;
        let login: LoginResponse =
            serde_json::from_str(&raw).map_err(|e| Error::Deserialization {
                message: format!("{e} (login response)"),
                body: raw.clone(),
            })?;

        self.token_slot()
            .set(SecretString::from(login.token.clone()));
        info!(user = username, "login successful");
        Ok(login)
    }

    /// Fetch the user the current token belongs to.
    ///
    /// Returns `Ok(None)` when there is no token or the backend no longer
    /// accepts it.
    pub async fn current_user(&self) -> Result<Option<UserRecord>, Error> {
        if !self.token_slot().is_set() {
            return Ok(None);
        }
        match self.get::<UserRecord>(CURRENT_USER_PATH).await {
            Ok(user) => Ok(Some(user)),
            Err(Error::SessionExpired) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// End the session locally. The backend keeps no server-side session
    /// for bearer tokens, so there is nothing to call.
    pub fn logout(&self) {
        self.token_slot().clear();
        debug!("token cleared");
    }

    /// Raw token value for persisting a session between runs.
    pub fn token(&self) -> Option<String> {
        self.token_slot()
            .get()
            .map(|t| t.expose_secret().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_slot_is_shared_between_clones() {
        let slot = TokenSlot::new();
        let other = slot.clone();
        assert!(!other.is_set());

        slot.set(SecretString::from("abc".to_string()));
        assert!(other.is_set());
        assert_eq!(
            other.get().map(|t| t.expose_secret().to_owned()),
            Some("abc".to_owned())
        );

        other.clear();
        assert!(!slot.is_set());
    }

    #[test]
    fn login_request_uses_backend_field_names() {
        let body = LoginRequest {
            nombre_usuario: "paulgomez",
            contrasena: "secreto",
        };
        let json = serde_json::to_value(&body).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({"nombreUsuario": "paulgomez", "contrasena": "secreto"}))
        );
    }
}
