// ── Core error types ──
//
// User-facing errors from taller-core. Consumers never see raw HTTP
// statuses or JSON parse failures; the `From<taller_api::Error>` impl
// translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Session errors ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Session expired -- log in again")]
    SessionExpired,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    /// Rejected before any request was sent.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── Backend errors ───────────────────────────────────────────────
    /// Non-success status from the backend. `message` is the backend's
    /// own explanation when it sent one.
    #[error("{message}")]
    Api { message: String, status: Option<u16> },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether the failure happened before reaching the network.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Whether the failure came back from the backend round trip rather
    /// than from local checks.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. }
                | Self::Timeout { .. }
                | Self::SessionExpired
                | Self::PermissionDenied { .. }
                | Self::Api { .. }
                | Self::NotFound { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<taller_api::Error> for CoreError {
    fn from(err: taller_api::Error) -> Self {
        match err {
            taller_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            taller_api::Error::SessionExpired => CoreError::SessionExpired,
            taller_api::Error::Forbidden { message } => CoreError::PermissionDenied { message },
            taller_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            taller_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            taller_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            taller_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            taller_api::Error::NotFound { path } => CoreError::NotFound {
                entity_type: "Record".into(),
                identifier: path,
            },
            taller_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            taller_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Unexpected response from backend: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_status_keeps_message() {
        let err = CoreError::from(taller_api::Error::Api {
            status: 400,
            message: "La placa ya existe".into(),
        });
        assert_eq!(err.to_string(), "La placa ya existe");
        assert!(err.is_network());
        assert!(!err.is_validation());
    }

    #[test]
    fn forbidden_becomes_permission_denied() {
        let err = CoreError::from(taller_api::Error::Forbidden {
            message: "Sin permisos".into(),
        });
        assert!(matches!(err, CoreError::PermissionDenied { .. }));
    }
}
