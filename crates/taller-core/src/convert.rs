// ── API-to-domain type conversions ──
//
// Bridges raw `taller_api::models` records into `crate::model` domain
// types. Each `From` impl normalizes field names and fills defaults for
// data the backend left out. The helpers below also run the other way,
// producing the wire text the backend expects in payloads.

use chrono::{NaiveDate, NaiveDateTime};
use strum::IntoEnumIterator;

use taller_api::models::{
    DurationValue, EmployeeRecord, InventoryRecord, MaintenanceRecord, OrderDetailRecord,
    OrderRecord, PaymentRecord, RoleRecord, ServiceRecord, UserRecord, VehicleRecord,
};

use crate::model::{
    Employee, EntityId, InventoryItem, MaintenanceEntry, Order, OrderDetail, OrderStatus, Payment,
    PaymentMethod, Role, Service, User, Vehicle,
};
use crate::permissions::{Capability, PermissionSet};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// ── Helpers ────────────────────────────────────────────────────────

fn id(raw: Option<i64>) -> Option<EntityId> {
    raw.map(EntityId::new)
}

/// Treat blank strings like missing ones.
fn text(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

/// Parse a calendar date. Accepts a bare date or a date-time, whose time
/// part is dropped. Anything else glued to the date is rejected.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
}

/// Parse a date-time to second precision.
///
/// The backend emits `2024-01-15T08:30:00.1234567`, sometimes with a
/// trailing `Z`. Fractional seconds and the zone marker are dropped; a
/// bare date means midnight.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim().trim_end_matches('Z');
    let whole = raw.split('.').next().unwrap_or(raw);
    NaiveDateTime::parse_from_str(whole, DATETIME_FORMAT)
        .ok()
        .or_else(|| parse_date(whole).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_datetime(at: NaiveDateTime) -> String {
    at.format(DATETIME_FORMAT).to_string()
}

/// Minutes from a duration label such as `"30 minutos"` or `"45"`.
pub fn parse_minutes(raw: &DurationValue) -> Option<u32> {
    match raw {
        DurationValue::Minutes(n) => u32::try_from(*n).ok(),
        DurationValue::Text(s) => s
            .split_whitespace()
            .next()
            .and_then(|n| n.parse::<u32>().ok()),
    }
}

/// The backend's duration label for `minutes`.
pub fn format_minutes(minutes: u32) -> String {
    format!("{minutes} minutos")
}

/// Read a role's permission JSON.
///
/// Accepts an object of named booleans or that object serialized into a
/// string. Unknown keys are ignored; malformed input grants nothing.
pub fn permissions_from_wire(value: &serde_json::Value) -> PermissionSet {
    let object = match value {
        serde_json::Value::String(s) => match serde_json::from_str::<serde_json::Value>(s) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => return PermissionSet::empty(),
        },
        serde_json::Value::Object(map) => map.clone(),
        _ => return PermissionSet::empty(),
    };

    Capability::iter()
        .filter(|cap| {
            object
                .get(cap.as_ref())
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false)
        })
        .collect()
}

/// A permission set as the JSON string the backend stores.
pub fn permissions_to_wire(permissions: PermissionSet) -> String {
    serde_json::to_string(&permissions).unwrap_or_else(|_| "{}".into())
}

// ── Entities ───────────────────────────────────────────────────────

impl From<VehicleRecord> for Vehicle {
    fn from(r: VehicleRecord) -> Self {
        Self {
            id: EntityId::new(r.id_vehiculo),
            owner_id: id(r.id_usuario),
            make: r.marca.unwrap_or_default(),
            model: r.modelo.unwrap_or_default(),
            year: r.anio,
            plate: r.placa.unwrap_or_default(),
            color: text(r.color),
            kind: text(r.tipo),
        }
    }
}

impl From<EmployeeRecord> for Employee {
    fn from(r: EmployeeRecord) -> Self {
        Self {
            id: EntityId::new(r.id_empleado),
            first_name: r.nombre.unwrap_or_default(),
            last_name: r.apellido.unwrap_or_default(),
            phone: r.telefono.unwrap_or_default(),
            email: r.correo.unwrap_or_default(),
            hired_at: r.fecha_contratacion.as_deref().and_then(parse_datetime),
            salary: r.salario.unwrap_or_default(),
            role_id: id(r.id_rol),
        }
    }
}

impl From<ServiceRecord> for Service {
    fn from(r: ServiceRecord) -> Self {
        Self {
            id: EntityId::new(r.id_servicio),
            name: r.nombre.unwrap_or_default(),
            description: text(r.descripcion),
            cost: r.costo.unwrap_or_default(),
            duration_minutes: r.duracion.as_ref().and_then(parse_minutes),
            active: r.activo.unwrap_or(true),
        }
    }
}

impl From<OrderRecord> for Order {
    fn from(r: OrderRecord) -> Self {
        Self {
            id: EntityId::new(r.id_orden),
            vehicle_id: id(r.id_vehiculo),
            employee_id: id(r.id_empleado),
            service_id: id(r.servicio_id),
            entered_on: r.fecha_ingreso.as_deref().and_then(parse_date),
            left_on: r.fecha_salida.as_deref().and_then(parse_date),
            status: text(r.estado).map_or(OrderStatus::Pending, OrderStatus::from),
            notes: text(r.observaciones),
            description: text(r.descripcion),
        }
    }
}

impl From<OrderDetailRecord> for OrderDetail {
    fn from(r: OrderDetailRecord) -> Self {
        Self {
            id: EntityId::new(r.id_detalle),
            order_id: id(r.id_orden),
            service_id: id(r.id_servicio),
            quantity: r.cantidad.unwrap_or(1),
            unit_price: r.precio_unitario,
            subtotal: r.subtotal,
        }
    }
}

impl From<PaymentRecord> for Payment {
    fn from(r: PaymentRecord) -> Self {
        Self {
            id: EntityId::new(r.id_pago),
            order_id: id(r.id_orden),
            amount: r.monto.unwrap_or_default(),
            paid_on: r.fecha_pago.as_deref().and_then(parse_date),
            method: text(r.metodo_pago).map_or(PaymentMethod::Cash, PaymentMethod::from),
            reference: text(r.referencia),
        }
    }
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        Self {
            id: EntityId::new(r.id_usuario),
            username: r.nombre_usuario.unwrap_or_default(),
            role_id: id(r.id_rol),
            employee_id: id(r.id_empleado),
            active: r.activo.unwrap_or(true),
        }
    }
}

impl From<RoleRecord> for Role {
    fn from(r: RoleRecord) -> Self {
        Self {
            id: EntityId::new(r.id_rol),
            name: r.nombre.unwrap_or_default(),
            description: text(r.descripcion),
            permissions: r
                .permisos
                .as_ref()
                .map_or_else(PermissionSet::empty, permissions_from_wire),
        }
    }
}

impl From<InventoryRecord> for InventoryItem {
    fn from(r: InventoryRecord) -> Self {
        Self {
            id: EntityId::new(r.id),
            name: r.name.unwrap_or_default(),
            category: r.category.unwrap_or_default(),
            quantity: r.quantity.unwrap_or_default(),
            unit: text(r.unit).unwrap_or_else(|| "Unidad".into()),
            min_quantity: r.min_quantity.unwrap_or(1),
            supplier: text(r.supplier),
            price: r.price,
        }
    }
}

impl From<MaintenanceRecord> for MaintenanceEntry {
    fn from(r: MaintenanceRecord) -> Self {
        Self {
            id: EntityId::new(r.id),
            vehicle: r.vehicle.unwrap_or_default(),
            date: r.date.as_deref().and_then(parse_date),
            kind: r.kind.unwrap_or_default(),
            cost: r.cost,
            status: text(r.status).map_or(OrderStatus::Pending, OrderStatus::from),
            details: text(r.details),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn datetime_drops_fraction_and_zone() {
        let at = parse_datetime("2024-01-15T08:30:00.1234567Z").unwrap();
        assert_eq!(format_datetime(at), "2024-01-15T08:30:00");
        let midnight = parse_datetime("2024-01-15").unwrap();
        assert_eq!(format_datetime(midnight), "2024-01-15T00:00:00");
        assert!(parse_datetime("ayer").is_none());
    }

    #[test]
    fn date_accepts_datetime_input() {
        assert_eq!(
            parse_date("2024-03-05T00:00:00"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(
            parse_date(" 2024-03-05 08:15:00 "),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
    }

    #[test]
    fn date_with_trailing_junk_is_rejected() {
        assert_eq!(parse_date("2024-01-15garbage"), None);
        assert_eq!(parse_date("2024-01-150"), None);
        assert_eq!(parse_date(""), None);
        assert!(parse_datetime("2024-01-15garbage").is_none());
    }

    #[test]
    fn minutes_from_label_or_number() {
        assert_eq!(parse_minutes(&DurationValue::Text("30 minutos".into())), Some(30));
        assert_eq!(parse_minutes(&DurationValue::Text("90".into())), Some(90));
        assert_eq!(parse_minutes(&DurationValue::Minutes(45)), Some(45));
        assert_eq!(parse_minutes(&DurationValue::Text("media hora".into())), None);
        assert_eq!(format_minutes(30), "30 minutos");
    }

    #[test]
    fn permissions_from_string_or_object() {
        let from_string = permissions_from_wire(&json!(
            "{\"gestionVehiculos\":true,\"gestionPagos\":false,\"verReportes\":true}"
        ));
        assert!(from_string.contains(Capability::ManageVehicles));
        assert!(from_string.contains(Capability::ViewReports));
        assert!(!from_string.contains(Capability::ManagePayments));

        let from_object = permissions_from_wire(&json!({"gestionUsuarios": true}));
        assert_eq!(from_object.iter().collect::<Vec<_>>(), vec![Capability::ManageUsers]);

        assert!(permissions_from_wire(&json!("no es json")).is_empty());
        assert!(permissions_from_wire(&json!(null)).is_empty());
    }

    #[test]
    fn permissions_wire_string_round_trips() {
        let set = PermissionSet::empty()
            .with(Capability::ManageOrders)
            .with(Capability::ManagePayments);
        let wire = permissions_to_wire(set);
        assert_eq!(permissions_from_wire(&json!(wire)), set);
    }

    #[test]
    fn service_record_normalizes() {
        let record: ServiceRecord = serde_json::from_value(json!({
            "idServicio": 3,
            "nombre": "Alineación",
            "descripcion": "  ",
            "costo": 180.5,
            "duracion": "45 minutos"
        }))
        .unwrap();
        let service = Service::from(record);
        assert_eq!(service.id, EntityId::new(3));
        assert_eq!(service.description, None);
        assert_eq!(service.duration_minutes, Some(45));
        assert!(service.active);
    }

    #[test]
    fn order_record_defaults_status() {
        let record: OrderRecord = serde_json::from_value(json!({
            "idOrden": 9,
            "idVehiculo": 1,
            "fechaIngreso": "2024-02-01T00:00:00",
            "estado": "En Proceso"
        }))
        .unwrap();
        let order = Order::from(record);
        assert_eq!(order.status, OrderStatus::InProgress);
        assert_eq!(order.entered_on, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(order.employee_id, None);
    }
}
