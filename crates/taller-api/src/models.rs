// Wire records exchanged with the backend.
//
// Field names follow the backend's JSON (Spanish camelCase). Records are
// permissive on read: anything the backend may omit is an `Option`.
// Payloads are what we send on create/update; the id is never part of a
// payload because it is addressed in the URL.

use serde::{Deserialize, Serialize};

// ── Vehicles ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub id_vehiculo: i64,
    #[serde(default)]
    pub id_usuario: Option<i64>,
    #[serde(default)]
    pub marca: Option<String>,
    #[serde(default)]
    pub modelo: Option<String>,
    #[serde(default)]
    pub anio: Option<i32>,
    #[serde(default)]
    pub placa: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePayload {
    pub id_usuario: i64,
    pub marca: String,
    pub modelo: String,
    pub anio: i32,
    pub placa: String,
    pub color: String,
    pub tipo: String,
}

/// One row of a vehicle's maintenance history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: i64,
    #[serde(default)]
    pub vehicle: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

// ── Employees ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub id_empleado: i64,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub apellido: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
    /// ISO date-time, sometimes with fractional seconds.
    #[serde(default)]
    pub fecha_contratacion: Option<String>,
    #[serde(default)]
    pub salario: Option<f64>,
    #[serde(default)]
    pub id_rol: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    pub nombre: String,
    pub apellido: String,
    pub telefono: String,
    pub correo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrasenia: Option<String>,
    pub fecha_contratacion: String,
    pub salario: f64,
    pub id_rol: i64,
    /// The backend binds the role navigation key separately.
    pub rol_id_rol: i64,
}

// ── Services ─────────────────────────────────────────────────────────

/// Service duration as the backend returns it: either a label such as
/// `"30 minutos"` or a bare number of minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Minutes(i64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id_servicio: i64,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub costo: Option<f64>,
    #[serde(default)]
    pub duracion: Option<DurationValue>,
    #[serde(default)]
    pub activo: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    pub nombre: String,
    pub descripcion: String,
    pub costo: f64,
    /// Always `"<n> minutos"`.
    pub duracion: String,
    pub activo: bool,
}

/// Body of the `PATCH …/status` endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPatch {
    pub activo: bool,
}

// ── Orders ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id_orden: i64,
    #[serde(default)]
    pub id_vehiculo: Option<i64>,
    #[serde(default)]
    pub id_empleado: Option<i64>,
    #[serde(default)]
    pub servicio_id: Option<i64>,
    #[serde(default)]
    pub fecha_ingreso: Option<String>,
    #[serde(default)]
    pub fecha_salida: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub observaciones: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub id_vehiculo: i64,
    pub id_empleado: i64,
    pub servicio_id: Option<i64>,
    pub fecha_ingreso: String,
    pub fecha_salida: Option<String>,
    pub estado: String,
    pub observaciones: String,
    pub descripcion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailRecord {
    pub id_detalle: i64,
    #[serde(default)]
    pub id_orden: Option<i64>,
    #[serde(default)]
    pub id_servicio: Option<i64>,
    #[serde(default)]
    pub cantidad: Option<i64>,
    #[serde(default)]
    pub precio_unitario: Option<f64>,
    #[serde(default)]
    pub subtotal: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailPayload {
    pub id_servicio: i64,
    pub cantidad: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio_unitario: Option<f64>,
}

// ── Payments ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id_pago: i64,
    #[serde(default)]
    pub id_orden: Option<i64>,
    #[serde(default)]
    pub monto: Option<f64>,
    #[serde(default)]
    pub fecha_pago: Option<String>,
    #[serde(default)]
    pub metodo_pago: Option<String>,
    #[serde(default)]
    pub referencia: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload {
    pub id_orden: i64,
    pub monto: f64,
    pub fecha_pago: String,
    pub metodo_pago: String,
    pub referencia: String,
}

// ── Users ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id_usuario: i64,
    #[serde(default)]
    pub nombre_usuario: Option<String>,
    #[serde(default)]
    pub id_rol: Option<i64>,
    #[serde(default)]
    pub id_empleado: Option<i64>,
    #[serde(default)]
    pub activo: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub nombre_usuario: String,
    /// Omitted on update when the operator left it blank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrasena: Option<String>,
    pub id_rol: i64,
    pub id_empleado: Option<i64>,
    pub activo: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub contrasena: String,
}

// ── Roles ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    pub id_rol: i64,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    /// A JSON object of capability flags, or that object serialized
    /// into a string, depending on backend version.
    #[serde(default)]
    pub permisos: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePayload {
    pub nombre: String,
    pub descripcion: String,
    /// Capability flags serialized as a JSON string.
    pub permisos: String,
}

// ── Inventory ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub min_quantity: Option<i64>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPayload {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub unit: String,
    pub min_quantity: i64,
    pub supplier: String,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChange {
    pub quantity: i64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn service_duration_accepts_text_or_number() {
        let text: ServiceRecord = serde_json::from_value(json!({
            "idServicio": 1,
            "nombre": "Cambio de aceite",
            "costo": 250.0,
            "duracion": "30 minutos",
            "activo": true
        }))
        .unwrap();
        assert_eq!(
            text.duracion,
            Some(DurationValue::Text("30 minutos".into()))
        );

        let number: ServiceRecord =
            serde_json::from_value(json!({"idServicio": 2, "duracion": 45})).unwrap();
        assert_eq!(number.duracion, Some(DurationValue::Minutes(45)));
        assert_eq!(number.nombre, None);
    }

    #[test]
    fn user_payload_omits_blank_password() {
        let payload = UserPayload {
            nombre_usuario: "ana".into(),
            contrasena: None,
            id_rol: 2,
            id_empleado: None,
            activo: true,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({"nombreUsuario": "ana", "idRol": 2, "idEmpleado": null, "activo": true})
        );
    }

    #[test]
    fn maintenance_type_field_is_renamed() {
        let row: MaintenanceRecord = serde_json::from_value(json!({
            "id": 1,
            "vehicle": "Toyota Corolla (ABC-123)",
            "date": "2023-05-10",
            "type": "Cambio de aceite",
            "cost": 250.0,
            "status": "Completado"
        }))
        .unwrap();
        assert_eq!(row.kind.as_deref(), Some("Cambio de aceite"));
        assert_eq!(row.details, None);
    }
}
