// Service-catalog resource

use taller_api::models::{ServicePayload, ServiceRecord};
use taller_api::resources::SERVICES;

use super::{Resource, flag_text, max_len, non_negative, opt_text, parse_amount, parse_flag, parse_number};
use crate::convert::format_minutes;
use crate::error::CoreError;
use crate::model::{EntityId, Service};

/// Marker for the service resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct Services;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDraft {
    pub nombre: String,
    pub descripcion: String,
    pub costo: String,
    /// Whole minutes.
    pub duracion: String,
    pub activo: String,
}

super::impl_draft!(ServiceDraft {
    "nombre" => nombre,
    "descripcion" => descripcion,
    "costo" => costo,
    "duracion" => duracion,
    "activo" => activo,
});

impl Resource for Services {
    type Entity = Service;
    type Draft = ServiceDraft;
    type Record = ServiceRecord;
    type Payload = ServicePayload;

    const KIND: &'static str = "service";
    const ENDPOINT: &'static str = SERVICES;
    const REQUIRED_FIELDS: &'static [&'static str] = &["nombre", "costo", "duracion"];

    fn id(entity: &Service) -> EntityId {
        entity.id
    }

    fn new_draft() -> ServiceDraft {
        ServiceDraft {
            activo: flag_text(true),
            ..ServiceDraft::default()
        }
    }

    fn draft_from(s: &Service) -> ServiceDraft {
        ServiceDraft {
            nombre: s.name.clone(),
            descripcion: s.description.clone().unwrap_or_default(),
            costo: s.cost.to_string(),
            duracion: opt_text(s.duration_minutes),
            activo: flag_text(s.active),
        }
    }

    fn to_payload(d: &ServiceDraft, _editing: Option<EntityId>) -> Result<ServicePayload, CoreError> {
        max_len("nombre", &d.nombre, 100)?;
        max_len("descripcion", &d.descripcion, 500)?;
        let costo = parse_amount("costo", &d.costo)?;
        non_negative("costo", costo)?;
        let minutes: u32 = parse_number("duracion", &d.duracion)?;
        if minutes == 0 {
            return Err(CoreError::validation("duracion: at least 1 minute"));
        }

        Ok(ServicePayload {
            nombre: d.nombre.trim().to_owned(),
            descripcion: d.descripcion.trim().to_owned(),
            costo,
            duracion: format_minutes(minutes),
            activo: parse_flag("activo", &d.activo, true)?,
        })
    }
}
