// ── Console facade ──
//
// Entry point for consumers. Owns the HTTP client and the session,
// handles login/logout/restore, answers navigation questions, and vends
// one `CrudController` per resource screen.

mod extras;
mod report;

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{debug, warn};

use taller_api::ApiClient;
use taller_api::models::{RoleRecord, UserRecord};
use taller_api::resources::ROLES;

use crate::config::ConsoleConfig;
use crate::controller::CrudController;
use crate::convert::permissions_from_wire;
use crate::error::CoreError;
use crate::permissions::{PermissionSet, Screen};
use crate::resource::Resource;
use crate::service::ApiService;
use crate::session::{Identity, Session};

pub use report::Report;

/// The administration console for one backend.
///
/// Cheap to share behind an `Arc`; controllers it vends hold their own
/// handle to the client.
pub struct Console {
    config: ConsoleConfig,
    client: Arc<ApiClient>,
    session: Arc<Session>,
}

impl Console {
    /// Build the HTTP client for `config`. Does not touch the network.
    pub fn new(config: ConsoleConfig) -> Result<Self, CoreError> {
        let session = Arc::new(Session::new());
        let client = ApiClient::new(config.url.as_str(), &config.transport(), session.token_slot())?;
        Ok(Self {
            config,
            client: Arc::new(client),
            session,
        })
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Authenticate and start a session.
    ///
    /// Permissions come from the login response when present, otherwise
    /// from the user's role.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<Arc<Identity>, CoreError> {
        let response = self.client.login(username, password).await?;
        let token = SecretString::from(response.token);

        let user = match response.usuario {
            Some(user) => user,
            None => match self.client.current_user().await {
                Ok(Some(user)) => user,
                Ok(None) => {
                    self.session.teardown();
                    return Err(CoreError::AuthenticationFailed {
                        message: "backend accepted the login but did not identify the user".into(),
                    });
                }
                Err(e) => {
                    self.session.teardown();
                    return Err(e.into());
                }
            },
        };

        let permissions = match response.permisos {
            Some(raw) => permissions_from_wire(&raw),
            None => self.role_permissions(&user).await,
        };

        Ok(self.start(token, user, permissions))
    }

    /// Resume a session from a stored token.
    ///
    /// Returns `None` (and leaves no session) when the backend no longer
    /// accepts the token.
    pub async fn restore(&self, token: SecretString) -> Result<Option<Arc<Identity>>, CoreError> {
        self.session.token_slot().set(token.clone());
        let user = match self.client.current_user().await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!("stored token rejected");
                self.session.teardown();
                return Ok(None);
            }
            Err(e) => {
                self.session.teardown();
                return Err(e.into());
            }
        };
        let permissions = self.role_permissions(&user).await;
        Ok(Some(self.start(token, user, permissions)))
    }

    /// End the session locally.
    pub fn logout(&self) {
        self.client.logout();
        self.session.teardown();
    }

    pub fn current_user(&self) -> Option<Arc<Identity>> {
        self.session.identity()
    }

    fn start(&self, token: SecretString, user: UserRecord, permissions: PermissionSet) -> Arc<Identity> {
        self.session.init(
            token,
            Identity {
                user: user.into(),
                permissions,
            },
        )
    }

    /// Permission set of the user's role. Advisory, so a failed lookup
    /// grants nothing rather than failing the login.
    async fn role_permissions(&self, user: &UserRecord) -> PermissionSet {
        let Some(role_id) = user.id_rol else {
            return PermissionSet::empty();
        };
        match self.client.get_record::<RoleRecord>(ROLES, role_id).await {
            Ok(role) => role
                .permisos
                .as_ref()
                .map_or_else(PermissionSet::empty, permissions_from_wire),
            Err(e) => {
                warn!(role_id, error = %e, "could not load role permissions");
                PermissionSet::empty()
            }
        }
    }

    // ── Navigation ───────────────────────────────────────────────────

    pub fn can_access(&self, screen: Screen) -> bool {
        self.session.can_access(screen)
    }

    pub fn navigable_screens(&self) -> Vec<Screen> {
        self.session.navigable_screens()
    }

    /// Refuse a screen the session may not open.
    pub fn require(&self, screen: Screen) -> Result<(), CoreError> {
        if self.can_access(screen) {
            Ok(())
        } else {
            Err(CoreError::PermissionDenied {
                message: format!(
                    "'{screen}' needs the {} permission",
                    screen.required_capability()
                ),
            })
        }
    }

    // ── Controllers ──────────────────────────────────────────────────

    /// A fresh controller for resource `R`.
    pub fn controller<R: Resource>(&self) -> CrudController<R> {
        CrudController::new(ApiService::new(Arc::clone(&self.client)))
    }
}
