// ── Session context ──
//
// Process-wide identity for the logged-in operator: bearer token, user
// record and permission set. Created once, shared via `Arc` with the HTTP
// client (which reads the token on every request) and the navigation
// shell. Only `init` and `teardown` write it.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::SecretString;
use serde::Serialize;
use tracing::{debug, info};

use taller_api::TokenSlot;

use crate::model::User;
use crate::permissions::{self, PermissionSet, Screen};

/// Who is logged in and what they may do.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub user: User,
    pub permissions: PermissionSet,
}

/// Session context with an explicit lifecycle.
#[derive(Debug, Default)]
pub struct Session {
    token: TokenSlot,
    identity: ArcSwapOption<Identity>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The token slot the HTTP client must share.
    pub fn token_slot(&self) -> TokenSlot {
        self.token.clone()
    }

    /// Begin a session, replacing any previous one.
    pub fn init(&self, token: SecretString, identity: Identity) -> Arc<Identity> {
        info!(user = %identity.user.username, permissions = %identity.permissions, "session started");
        let identity = Arc::new(identity);
        self.token.set(token);
        self.identity.store(Some(Arc::clone(&identity)));
        identity
    }

    /// End the session. Safe to call when none is active.
    pub fn teardown(&self) {
        if self.is_active() {
            info!("session ended");
        } else {
            debug!("teardown without active session");
        }
        self.token.clear();
        self.identity.store(None);
    }

    pub fn is_active(&self) -> bool {
        self.identity.load().is_some()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_set()
    }

    pub fn identity(&self) -> Option<Arc<Identity>> {
        self.identity.load_full()
    }

    /// Granted capabilities; empty when logged out.
    pub fn permissions(&self) -> PermissionSet {
        self.identity
            .load()
            .as_ref()
            .map_or_else(PermissionSet::empty, |id| id.permissions)
    }

    pub fn can_access(&self, screen: Screen) -> bool {
        permissions::can_access(self.permissions(), screen)
    }

    pub fn navigable_screens(&self) -> Vec<Screen> {
        permissions::navigable_screens(self.permissions())
    }
}
