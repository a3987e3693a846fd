// Vehicle resource

use chrono::Datelike;

use taller_api::models::{VehiclePayload, VehicleRecord};
use taller_api::resources::VEHICLES;

use super::{Resource, max_len, opt_text, parse_number};
use crate::error::CoreError;
use crate::model::{EntityId, Vehicle};

pub const MIN_YEAR: i32 = 1900;
pub const PLATE_MAX_LEN: usize = 10;

/// Marker for the vehicle resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vehicles;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleDraft {
    pub id_usuario: String,
    pub marca: String,
    pub modelo: String,
    pub anio: String,
    pub placa: String,
    pub color: String,
    pub tipo: String,
}

super::impl_draft!(VehicleDraft {
    "idUsuario" => id_usuario,
    "marca" => marca,
    "modelo" => modelo,
    "anio" => anio,
    "placa" => placa,
    "color" => color,
    "tipo" => tipo,
});

impl Resource for Vehicles {
    type Entity = Vehicle;
    type Draft = VehicleDraft;
    type Record = VehicleRecord;
    type Payload = VehiclePayload;

    const KIND: &'static str = "vehicle";
    const ENDPOINT: &'static str = VEHICLES;
    const REQUIRED_FIELDS: &'static [&'static str] = &["idUsuario", "marca", "modelo", "anio", "placa"];

    fn id(entity: &Vehicle) -> EntityId {
        entity.id
    }

    fn draft_from(v: &Vehicle) -> VehicleDraft {
        VehicleDraft {
            id_usuario: opt_text(v.owner_id),
            marca: v.make.clone(),
            modelo: v.model.clone(),
            anio: opt_text(v.year),
            placa: v.plate.clone(),
            color: v.color.clone().unwrap_or_default(),
            tipo: v.kind.clone().unwrap_or_default(),
        }
    }

    fn to_payload(d: &VehicleDraft, _editing: Option<EntityId>) -> Result<VehiclePayload, CoreError> {
        let anio: i32 = parse_number("anio", &d.anio)?;
        let newest = chrono::Local::now().year();
        if !(MIN_YEAR..=newest).contains(&anio) {
            return Err(CoreError::validation(format!(
                "anio: must be between {MIN_YEAR} and {newest}"
            )));
        }
        max_len("placa", &d.placa, PLATE_MAX_LEN)?;

        Ok(VehiclePayload {
            id_usuario: parse_number("idUsuario", &d.id_usuario)?,
            marca: d.marca.trim().to_owned(),
            modelo: d.modelo.trim().to_owned(),
            anio,
            placa: d.placa.trim().to_uppercase(),
            color: d.color.trim().to_owned(),
            tipo: d.tipo.trim().to_owned(),
        })
    }
}
