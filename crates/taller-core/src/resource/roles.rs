// Role resource
//
// The six capability checkboxes are separate draft fields named after
// their JSON keys; the payload folds them back into the JSON string the
// backend stores in `permisos`.

use taller_api::models::{RolePayload, RoleRecord};
use taller_api::resources::ROLES;

use super::{Resource, flag_text, max_len, parse_flag};
use crate::convert::permissions_to_wire;
use crate::error::CoreError;
use crate::model::{EntityId, Role};
use crate::permissions::{Capability, PermissionSet};

/// Marker for the role resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct Roles;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDraft {
    pub nombre: String,
    pub descripcion: String,
    pub gestion_usuarios: String,
    pub gestion_vehiculos: String,
    pub gestion_servicios: String,
    pub gestion_ordenes: String,
    pub gestion_pagos: String,
    pub ver_reportes: String,
}

impl Default for RoleDraft {
    fn default() -> Self {
        Self::with_permissions(String::new(), String::new(), PermissionSet::empty())
    }
}

impl RoleDraft {
    fn with_permissions(nombre: String, descripcion: String, p: PermissionSet) -> Self {
        Self {
            nombre,
            descripcion,
            gestion_usuarios: flag_text(p.contains(Capability::ManageUsers)),
            gestion_vehiculos: flag_text(p.contains(Capability::ManageVehicles)),
            gestion_servicios: flag_text(p.contains(Capability::ManageServices)),
            gestion_ordenes: flag_text(p.contains(Capability::ManageOrders)),
            gestion_pagos: flag_text(p.contains(Capability::ManagePayments)),
            ver_reportes: flag_text(p.contains(Capability::ViewReports)),
        }
    }

    /// Capabilities ticked in this draft.
    pub fn permissions(&self) -> Result<PermissionSet, CoreError> {
        use strum::IntoEnumIterator;

        let mut set = PermissionSet::empty();
        for cap in Capability::iter() {
            let raw = super::Draft::field(self, cap.as_ref()).unwrap_or_default();
            set.set(cap, parse_flag(cap.as_ref(), raw, false)?);
        }
        Ok(set)
    }
}

super::impl_draft!(RoleDraft {
    "nombre" => nombre,
    "descripcion" => descripcion,
    "gestionUsuarios" => gestion_usuarios,
    "gestionVehiculos" => gestion_vehiculos,
    "gestionServicios" => gestion_servicios,
    "gestionOrdenes" => gestion_ordenes,
    "gestionPagos" => gestion_pagos,
    "verReportes" => ver_reportes,
});

impl Resource for Roles {
    type Entity = Role;
    type Draft = RoleDraft;
    type Record = RoleRecord;
    type Payload = RolePayload;

    const KIND: &'static str = "role";
    const ENDPOINT: &'static str = ROLES;
    const REQUIRED_FIELDS: &'static [&'static str] = &["nombre"];

    fn id(entity: &Role) -> EntityId {
        entity.id
    }

    fn draft_from(r: &Role) -> RoleDraft {
        RoleDraft::with_permissions(
            r.name.clone(),
            r.description.clone().unwrap_or_default(),
            r.permissions,
        )
    }

    fn to_payload(d: &RoleDraft, _editing: Option<EntityId>) -> Result<RolePayload, CoreError> {
        max_len("nombre", &d.nombre, 50)?;
        Ok(RolePayload {
            nombre: d.nombre.trim().to_owned(),
            descripcion: d.descripcion.trim().to_owned(),
            permisos: permissions_to_wire(d.permissions()?),
        })
    }
}
