// ── CRUD controller ──
//
// Generic list/draft/editing state machine for one resource type. Every
// screen drives one of these: fetch the list, edit a draft, submit, and
// refetch. State changes are published on a `watch` channel so a
// renderer can follow `loading` while a call is in flight.
//
//   Idle ──begin_create / begin_edit──▶ Drafting
//   Drafting ──submit ok──▶ Idle        Drafting ──submit err──▶ Drafting
//   Drafting ──cancel──▶ Idle           refresh: orthogonal

use std::fmt;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::EntityId;
use crate::resource::{Draft, Resource};
use crate::service::{ApiService, ListParams, ResourceService};

// ── ControllerState ─────────────────────────────────────────────────

/// Snapshot of one controller.
pub struct ControllerState<R: Resource> {
    pub items: Vec<R::Entity>,
    /// `Some` while the operator is editing or creating.
    pub draft: Option<R::Draft>,
    /// Target of the next submit. `None` means the submit creates.
    pub editing_id: Option<EntityId>,
    /// True only while a fetch, submit, or delete is outstanding.
    pub loading: bool,
    pub error: Option<String>,
}

impl<R: Resource> ControllerState<R> {
    pub fn is_drafting(&self) -> bool {
        self.draft.is_some()
    }
}

impl<R: Resource> Default for ControllerState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            draft: None,
            editing_id: None,
            loading: false,
            error: None,
        }
    }
}

impl<R: Resource> Clone for ControllerState<R> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            draft: self.draft.clone(),
            editing_id: self.editing_id,
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

impl<R: Resource> fmt::Debug for ControllerState<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerState")
            .field("kind", &R::KIND)
            .field("items", &self.items.len())
            .field("draft", &self.draft)
            .field("editing_id", &self.editing_id)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish()
    }
}

// ── CrudController ──────────────────────────────────────────────────

/// State machine for one resource. Mutating operations take `&mut self`,
/// so a second submit cannot start while one is outstanding.
pub struct CrudController<R: Resource, S = ApiService<R>> {
    service: S,
    state: watch::Sender<ControllerState<R>>,
    /// Sent with every list fetch.
    params: ListParams,
}

impl<R: Resource, S: ResourceService<R>> CrudController<R, S> {
    pub fn new(service: S) -> Self {
        let (state, _) = watch::channel(ControllerState::default());
        Self {
            service,
            state,
            params: ListParams::new(),
        }
    }

    /// Filter every later fetch with `params`.
    #[must_use]
    pub fn with_params(mut self, params: ListParams) -> Self {
        self.params = params;
        self
    }

    /// Replace the list filters. Takes effect on the next refresh.
    pub fn set_params(&mut self, params: ListParams) {
        self.params = params;
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Current state, cloned.
    pub fn state(&self) -> ControllerState<R> {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ControllerState<R>> {
        self.state.subscribe()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    fn update(&self, f: impl FnOnce(&mut ControllerState<R>)) {
        self.state.send_modify(f);
    }

    fn fail(&self, message: String) {
        self.update(|s| {
            s.loading = false;
            s.error = Some(message);
        });
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Fetch the list under the current filters. On failure the previous
    /// items stay.
    pub async fn refresh(&mut self) -> Result<(), CoreError> {
        self.update(|s| s.loading = true);
        match self.service.list(&self.params).await {
            Ok(items) => {
                debug!(kind = R::KIND, count = items.len(), "refreshed");
                self.update(|s| {
                    s.items = items;
                    s.loading = false;
                    s.error = None;
                });
                Ok(())
            }
            Err(e) => {
                warn!(kind = R::KIND, error = %e, "refresh failed");
                self.fail(failure_message(&e, &format!("could not load {}s", R::KIND)));
                Err(e)
            }
        }
    }

    /// Start a new entity. No network.
    pub fn begin_create(&mut self) {
        self.update(|s| {
            s.draft = Some(R::new_draft());
            s.editing_id = None;
            s.error = None;
        });
    }

    /// Start editing `entity`, replacing any draft in progress. No network.
    pub fn begin_edit(&mut self, entity: &R::Entity) {
        let draft = R::draft_from(entity);
        let id = R::id(entity);
        self.update(|s| {
            s.draft = Some(draft);
            s.editing_id = Some(id);
            s.error = None;
        });
    }

    /// Set one draft field. No network.
    pub fn update_draft_field(&mut self, field: &str, value: impl Into<String>) -> Result<(), CoreError> {
        let mut draft = self
            .state
            .borrow()
            .draft
            .clone()
            .ok_or_else(|| CoreError::validation("no draft in progress"))?;
        draft.set(field, value)?;
        self.update(|s| s.draft = Some(draft));
        Ok(())
    }

    /// Validate and send the draft: create when no id is being edited,
    /// update otherwise. Success clears the draft and refetches.
    ///
    /// Returns the written entity when the backend echoed it. On failure
    /// the draft is kept for another attempt.
    pub async fn submit(&mut self) -> Result<Option<R::Entity>, CoreError> {
        let (draft, editing_id) = {
            let s = self.state.borrow();
            (s.draft.clone(), s.editing_id)
        };
        let Some(draft) = draft else {
            let err = CoreError::validation("no draft in progress");
            self.fail(err.to_string());
            return Err(err);
        };

        let missing = draft.missing(R::REQUIRED_FIELDS);
        if !missing.is_empty() {
            let err = CoreError::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            ));
            self.fail(err.to_string());
            return Err(err);
        }

        let payload = match R::to_payload(&draft, editing_id) {
            Ok(p) => p,
            Err(e) => {
                self.fail(e.to_string());
                return Err(e);
            }
        };

        self.update(|s| {
            s.loading = true;
            s.error = None;
        });
        let result = match editing_id {
            None => self.service.create(&payload).await,
            Some(id) => self.service.update(id, &payload).await,
        };

        match result {
            Ok(written) => {
                info!(kind = R::KIND, id = ?editing_id, "saved");
                self.update(|s| {
                    s.draft = None;
                    s.editing_id = None;
                    s.loading = false;
                });
                // The write stands even if the refetch fails; that failure
                // is recorded in `error`.
                let _ = self.refresh().await;
                Ok(written)
            }
            Err(e) => {
                warn!(kind = R::KIND, error = %e, "save failed");
                self.fail(failure_message(&e, &format!("could not save {}", R::KIND)));
                Err(e)
            }
        }
    }

    /// Delete `id` once `confirm` approves it.
    ///
    /// Returns `false` without any request when declined. Deleting the
    /// entity being edited also discards its draft.
    pub async fn remove(
        &mut self,
        id: EntityId,
        confirm: impl FnOnce(EntityId) -> bool,
    ) -> Result<bool, CoreError> {
        if !confirm(id) {
            debug!(kind = R::KIND, %id, "removal declined");
            return Ok(false);
        }

        self.update(|s| {
            s.loading = true;
            s.error = None;
        });
        match self.service.remove(id).await {
            Ok(()) => {
                info!(kind = R::KIND, %id, "removed");
                self.update(|s| {
                    if s.editing_id == Some(id) {
                        s.draft = None;
                        s.editing_id = None;
                    }
                    s.loading = false;
                });
                let _ = self.refresh().await;
                Ok(true)
            }
            Err(e) => {
                warn!(kind = R::KIND, %id, error = %e, "remove failed");
                self.fail(failure_message(&e, &format!("could not delete {}", R::KIND)));
                Err(e)
            }
        }
    }

    /// Drop the draft. No network.
    pub fn cancel(&mut self) {
        self.update(|s| {
            s.draft = None;
            s.editing_id = None;
        });
    }

    /// Seed an edit from the backend's current copy of `id`.
    pub async fn begin_edit_by_id(&mut self, id: EntityId) -> Result<(), CoreError> {
        self.update(|s| s.loading = true);
        match self.service.get(id).await {
            Ok(entity) => {
                self.update(|s| s.loading = false);
                self.begin_edit(&entity);
                Ok(())
            }
            Err(e) => {
                self.fail(failure_message(&e, &format!("could not load {}", R::KIND)));
                Err(e)
            }
        }
    }
}

/// The backend's own message when it sent one, else `fallback`.
fn failure_message(err: &CoreError, fallback: &str) -> String {
    match err {
        CoreError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
        CoreError::Validation { message } => message.clone(),
        other => format!("{fallback}: {other}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::model::{Service, Vehicle};
    use crate::resource::{Services, Vehicles};
    use pretty_assertions::assert_eq;
    use taller_api::models::{ServicePayload, VehiclePayload};

    /// In-memory vehicle service recording every call.
    #[derive(Default)]
    struct FakeVehicles {
        items: Mutex<Vec<Vehicle>>,
        calls: Mutex<Vec<String>>,
        fail_list: Mutex<bool>,
    }

    impl FakeVehicles {
        fn with(items: Vec<Vehicle>) -> Self {
            Self {
                items: Mutex::new(items),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn writes(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter(|c| !c.starts_with("list"))
                .collect()
        }
    }

    fn vehicle(id: i64, plate: &str) -> Vehicle {
        Vehicle {
            id: EntityId::new(id),
            owner_id: Some(EntityId::new(1)),
            make: "Nissan".into(),
            model: "Versa".into(),
            year: Some(2020),
            plate: plate.into(),
            color: Some("Gris".into()),
            kind: None,
        }
    }

    fn apply(id: EntityId, p: &VehiclePayload) -> Vehicle {
        Vehicle {
            id,
            owner_id: Some(EntityId::new(p.id_usuario)),
            make: p.marca.clone(),
            model: p.modelo.clone(),
            year: Some(p.anio),
            plate: p.placa.clone(),
            color: Some(p.color.clone()).filter(|c| !c.is_empty()),
            kind: Some(p.tipo.clone()).filter(|c| !c.is_empty()),
        }
    }

    impl ResourceService<Vehicles> for FakeVehicles {
        async fn list(&self, params: &[(String, String)]) -> Result<Vec<Vehicle>, CoreError> {
            let query: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
            let call = if query.is_empty() {
                "list".to_owned()
            } else {
                format!("list?{}", query.join("&"))
            };
            self.calls.lock().unwrap().push(call);
            if *self.fail_list.lock().unwrap() {
                return Err(CoreError::Api {
                    message: "Servidor no disponible".into(),
                    status: Some(503),
                });
            }
            Ok(self.items.lock().unwrap().clone())
        }

        async fn get(&self, id: EntityId) -> Result<Vehicle, CoreError> {
            self.items
                .lock()
                .unwrap()
                .iter()
                .find(|v| v.id == id)
                .cloned()
                .ok_or(CoreError::NotFound {
                    entity_type: "Vehicle".into(),
                    identifier: id.to_string(),
                })
        }

        async fn create(&self, p: &VehiclePayload) -> Result<Option<Vehicle>, CoreError> {
            self.calls.lock().unwrap().push(format!("create {}", p.placa));
            let mut items = self.items.lock().unwrap();
            let next = items.iter().map(|v| v.id.get()).max().unwrap_or(0) + 1;
            let created = apply(EntityId::new(next), p);
            items.push(created.clone());
            Ok(Some(created))
        }

        async fn update(&self, id: EntityId, p: &VehiclePayload) -> Result<Option<Vehicle>, CoreError> {
            self.calls.lock().unwrap().push(format!("update {id} {}", p.placa));
            let mut items = self.items.lock().unwrap();
            if let Some(slot) = items.iter_mut().find(|v| v.id == id) {
                *slot = apply(id, p);
            }
            Ok(None)
        }

        async fn remove(&self, id: EntityId) -> Result<(), CoreError> {
            self.calls.lock().unwrap().push(format!("remove {id}"));
            self.items.lock().unwrap().retain(|v| v.id != id);
            Ok(())
        }
    }

    fn controller(items: Vec<Vehicle>) -> CrudController<Vehicles, FakeVehicles> {
        CrudController::new(FakeVehicles::with(items))
    }

    #[tokio::test]
    async fn create_sends_one_request_and_refreshes() {
        let mut c = controller(vec![vehicle(1, "AAA-111")]);
        c.refresh().await.unwrap();

        c.begin_create();
        for (k, v) in [
            ("idUsuario", "1"),
            ("marca", "Mazda"),
            ("modelo", "3"),
            ("anio", "2021"),
            ("placa", "BBB-222"),
        ] {
            c.update_draft_field(k, v).unwrap();
        }
        c.submit().await.unwrap();

        assert_eq!(c.service().writes(), vec!["create BBB-222".to_string()]);
        let state = c.state();
        assert!(state.draft.is_none());
        assert_eq!(state.editing_id, None);
        assert!(!state.loading);
        assert!(state.items.iter().any(|v| v.plate == "BBB-222"));
    }

    #[tokio::test]
    async fn refresh_forwards_list_filters() {
        let mut c = controller(vec![vehicle(1, "AAA-111")])
            .with_params(vec![("idUsuario".into(), "1".into())]);
        c.refresh().await.unwrap();
        c.set_params(Vec::new());
        c.refresh().await.unwrap();

        assert_eq!(
            c.service().calls(),
            vec!["list?idUsuario=1".to_string(), "list".to_string()]
        );
        assert!(c.params().is_empty());
    }

    #[tokio::test]
    async fn unchanged_edit_updates_same_id_with_same_values() {
        let original = vehicle(7, "CCC-333");
        let mut c = controller(vec![original.clone()]);
        c.refresh().await.unwrap();

        c.begin_edit(&original);
        assert_eq!(c.state().editing_id, Some(EntityId::new(7)));
        c.submit().await.unwrap();

        assert_eq!(c.service().writes(), vec!["update 7 CCC-333".to_string()]);
        assert_eq!(c.state().items, vec![original]);
    }

    #[tokio::test]
    async fn missing_required_field_makes_no_call() {
        let mut c = controller(vec![]);
        c.begin_create();
        c.update_draft_field("marca", "Ford").unwrap();
        c.update_draft_field("modelo", "   ").unwrap();

        let err = c.submit().await.unwrap_err();
        assert!(err.is_validation());
        assert!(c.service().calls().is_empty());
        let state = c.state();
        assert!(state.error.unwrap().contains("modelo"));
        assert!(state.draft.is_some(), "draft kept for correction");
    }

    #[tokio::test]
    async fn declined_remove_makes_no_call() {
        let mut c = controller(vec![vehicle(1, "AAA-111")]);
        let removed = c.remove(EntityId::new(1), |_| false).await.unwrap();
        assert!(!removed);
        assert!(c.service().calls().is_empty());

        let removed = c.remove(EntityId::new(1), |_| true).await.unwrap();
        assert!(removed);
        assert_eq!(c.service().writes(), vec!["remove 1".to_string()]);
    }

    #[tokio::test]
    async fn removing_edited_entity_clears_draft() {
        let target = vehicle(2, "DDD-444");
        let mut c = controller(vec![vehicle(1, "AAA-111"), target.clone()]);
        c.begin_edit(&target);

        c.remove(target.id, |_| true).await.unwrap();
        let state = c.state();
        assert!(state.draft.is_none());
        assert_eq!(state.editing_id, None);
        assert_eq!(state.items.len(), 1);
    }

    #[tokio::test]
    async fn removing_other_entity_keeps_draft() {
        let edited = vehicle(1, "AAA-111");
        let mut c = controller(vec![edited.clone(), vehicle(2, "DDD-444")]);
        c.begin_edit(&edited);

        c.remove(EntityId::new(2), |_| true).await.unwrap();
        assert_eq!(c.state().editing_id, Some(EntityId::new(1)));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_items_and_sets_error() {
        let mut c = controller(vec![vehicle(1, "AAA-111")]);
        c.refresh().await.unwrap();
        *c.service().fail_list.lock().unwrap() = true;

        assert!(c.refresh().await.is_err());
        let state = c.state();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.error.as_deref(), Some("Servidor no disponible"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn second_edit_replaces_first_draft() {
        let a = vehicle(1, "AAA-111");
        let mut b = vehicle(2, "BBB-222");
        b.color = None;
        let mut c = controller(vec![a.clone(), b.clone()]);

        c.begin_edit(&a);
        c.update_draft_field("tipo", "Sedán").unwrap();
        c.begin_edit(&b);

        let state = c.state();
        assert_eq!(state.editing_id, Some(EntityId::new(2)));
        assert_eq!(state.draft, Some(Vehicles::draft_from(&b)));
        let draft = state.draft.unwrap();
        assert_eq!(draft.color, "");
        assert_eq!(draft.tipo, "");
    }

    #[tokio::test]
    async fn cancel_returns_to_idle() {
        let a = vehicle(1, "AAA-111");
        let mut c = controller(vec![a.clone()]);
        c.begin_edit(&a);
        c.cancel();
        let state = c.state();
        assert!(!state.is_drafting());
        assert_eq!(state.editing_id, None);
        assert!(c.service().calls().is_empty());
    }

    #[tokio::test]
    async fn update_draft_field_rejects_unknown_names() {
        let mut c = controller(vec![]);
        assert!(c.update_draft_field("marca", "Kia").is_err(), "no draft yet");
        c.begin_create();
        let err = c.update_draft_field("motor", "V6").unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn subscribers_see_loading_settle() {
        let mut c = controller(vec![vehicle(1, "AAA-111")]);
        let mut rx = c.subscribe();
        c.refresh().await.unwrap();
        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        assert!(!seen.loading);
        assert_eq!(seen.items.len(), 1);
    }

    // ── Services: duration label on the wire ────────────────────────

    #[derive(Default)]
    struct FakeServices {
        items: Mutex<Vec<Service>>,
        posted: Mutex<Vec<ServicePayload>>,
    }

    impl ResourceService<Services> for FakeServices {
        async fn list(&self, _: &[(String, String)]) -> Result<Vec<Service>, CoreError> {
            Ok(self.items.lock().unwrap().clone())
        }

        async fn get(&self, id: EntityId) -> Result<Service, CoreError> {
            Err(CoreError::NotFound {
                entity_type: "Service".into(),
                identifier: id.to_string(),
            })
        }

        async fn create(&self, p: &ServicePayload) -> Result<Option<Service>, CoreError> {
            self.posted.lock().unwrap().push(p.clone());
            self.items.lock().unwrap().push(Service {
                id: EntityId::new(1),
                name: p.nombre.clone(),
                description: None,
                cost: p.costo,
                duration_minutes: Some(30),
                active: p.activo,
            });
            Ok(None)
        }

        async fn update(&self, _: EntityId, _: &ServicePayload) -> Result<Option<Service>, CoreError> {
            Ok(None)
        }

        async fn remove(&self, _: EntityId) -> Result<(), CoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn service_create_posts_duration_label() {
        let mut c: CrudController<Services, FakeServices> = CrudController::new(FakeServices::default());
        c.begin_create();
        c.update_draft_field("nombre", "Cambio de aceite").unwrap();
        c.update_draft_field("costo", "250").unwrap();
        c.update_draft_field("duracion", "30").unwrap();
        c.submit().await.unwrap();

        let posted = c.service().posted.lock().unwrap().clone();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].duracion, "30 minutos");
        let state = c.state();
        assert!(state.draft.is_none());
        assert_eq!(state.items[0].name, "Cambio de aceite");
    }
}
