// Work-order resource

use taller_api::models::{OrderPayload, OrderRecord};
use taller_api::resources::ORDERS;

use super::{Resource, opt_text, parse_date_field, parse_number, parse_optional};
use crate::convert::format_date;
use crate::error::CoreError;
use crate::model::{EntityId, Order, OrderStatus};

/// Marker for the work-order resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct Orders;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    pub id_vehiculo: String,
    pub id_empleado: String,
    pub servicio_id: String,
    pub fecha_ingreso: String,
    pub fecha_salida: String,
    pub estado: String,
    pub observaciones: String,
    pub descripcion: String,
}

super::impl_draft!(OrderDraft {
    "idVehiculo" => id_vehiculo,
    "idEmpleado" => id_empleado,
    "servicioId" => servicio_id,
    "fechaIngreso" => fecha_ingreso,
    "fechaSalida" => fecha_salida,
    "estado" => estado,
    "observaciones" => observaciones,
    "descripcion" => descripcion,
});

impl Resource for Orders {
    type Entity = Order;
    type Draft = OrderDraft;
    type Record = OrderRecord;
    type Payload = OrderPayload;

    const KIND: &'static str = "order";
    const ENDPOINT: &'static str = ORDERS;
    const REQUIRED_FIELDS: &'static [&'static str] =
        &["idVehiculo", "idEmpleado", "fechaIngreso", "estado"];

    fn id(entity: &Order) -> EntityId {
        entity.id
    }

    fn new_draft() -> OrderDraft {
        OrderDraft {
            fecha_ingreso: format_date(chrono::Local::now().date_naive()),
            estado: OrderStatus::Pending.to_string(),
            ..OrderDraft::default()
        }
    }

    fn draft_from(o: &Order) -> OrderDraft {
        OrderDraft {
            id_vehiculo: opt_text(o.vehicle_id),
            id_empleado: opt_text(o.employee_id),
            servicio_id: opt_text(o.service_id),
            fecha_ingreso: o.entered_on.map(format_date).unwrap_or_default(),
            fecha_salida: o.left_on.map(format_date).unwrap_or_default(),
            estado: o.status.to_string(),
            observaciones: o.notes.clone().unwrap_or_default(),
            descripcion: o.description.clone().unwrap_or_default(),
        }
    }

    fn to_payload(d: &OrderDraft, editing: Option<EntityId>) -> Result<OrderPayload, CoreError> {
        let estado = OrderStatus::from(d.estado.trim().to_owned());
        // Legacy rows may carry a status outside the known set; updates
        // send it back verbatim, new orders must pick a known one.
        if editing.is_none() && !estado.is_known() {
            let allowed: Vec<String> = OrderStatus::ALL.iter().map(ToString::to_string).collect();
            return Err(CoreError::validation(format!(
                "estado: expected one of: {}",
                allowed.join(", ")
            )));
        }
        let ingreso = parse_date_field("fechaIngreso", &d.fecha_ingreso)?;
        let salida = if d.fecha_salida.trim().is_empty() {
            None
        } else {
            Some(parse_date_field("fechaSalida", &d.fecha_salida)?)
        };

        Ok(OrderPayload {
            id_vehiculo: parse_number("idVehiculo", &d.id_vehiculo)?,
            id_empleado: parse_number("idEmpleado", &d.id_empleado)?,
            servicio_id: parse_optional("servicioId", &d.servicio_id)?,
            fecha_ingreso: format_date(ingreso),
            fecha_salida: salida.map(format_date),
            estado: estado.to_string(),
            observaciones: d.observaciones.trim().to_owned(),
            descripcion: d.descripcion.trim().to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resource::Draft;

    #[test]
    fn new_draft_defaults_to_pending_today() {
        let d = Orders::new_draft();
        assert_eq!(d.estado, "Pendiente");
        assert!(crate::convert::parse_date(&d.fecha_ingreso).is_some());
    }

    #[test]
    fn payload_keeps_optional_fields_empty() {
        let mut d = Orders::new_draft();
        d.set("idVehiculo", "1").unwrap();
        d.set("idEmpleado", "2").unwrap();
        d.set("fechaIngreso", "2024-05-02").unwrap();
        let payload = Orders::to_payload(&d, None).unwrap();
        assert_eq!(payload.servicio_id, None);
        assert_eq!(payload.fecha_salida, None);
        assert_eq!(payload.estado, "Pendiente");
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut d = Orders::new_draft();
        d.set("idVehiculo", "1").unwrap();
        d.set("idEmpleado", "2").unwrap();
        d.set("estado", "Perdida").unwrap();
        assert!(Orders::to_payload(&d, None).unwrap_err().is_validation());
    }

    fn stored(status: &str) -> Order {
        Order {
            id: EntityId::new(12),
            vehicle_id: Some(EntityId::new(3)),
            employee_id: Some(EntityId::new(4)),
            service_id: None,
            entered_on: crate::convert::parse_date("2024-03-01"),
            left_on: crate::convert::parse_date("2024-03-05"),
            status: OrderStatus::from(status.to_owned()),
            notes: Some("cliente espera".into()),
            description: None,
        }
    }

    #[test]
    fn unchanged_edit_round_trips() {
        let order = stored("en proceso");
        let d = Orders::draft_from(&order);
        let payload = Orders::to_payload(&d, Some(order.id)).unwrap();
        assert_eq!(payload.id_vehiculo, 3);
        assert_eq!(payload.id_empleado, 4);
        assert_eq!(payload.servicio_id, None);
        assert_eq!(payload.fecha_ingreso, "2024-03-01");
        assert_eq!(payload.fecha_salida.as_deref(), Some("2024-03-05"));
        assert_eq!(payload.estado, "En Proceso");
        assert_eq!(payload.observaciones, "cliente espera");
        assert_eq!(payload.descripcion, "");
    }

    #[test]
    fn legacy_status_survives_an_edit() {
        let order = stored("Entregado");
        let d = Orders::draft_from(&order);
        assert_eq!(d.estado, "Entregado");
        let payload = Orders::to_payload(&d, Some(order.id)).unwrap();
        assert_eq!(payload.estado, "Entregado");
        assert!(Orders::to_payload(&d, None).is_err());
    }
}
