// Employee resource

use taller_api::models::{EmployeePayload, EmployeeRecord};
use taller_api::resources::EMPLOYEES;

use super::{Resource, non_negative, opt_text, parse_amount, parse_number};
use crate::convert::{format_datetime, parse_datetime};
use crate::error::CoreError;
use crate::model::{EntityId, Employee};

/// Marker for the employee resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct Employees;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub nombre: String,
    pub apellido: String,
    pub telefono: String,
    pub correo: String,
    /// Write-only. Blank on update keeps the stored password.
    pub contrasenia: String,
    pub fecha_contratacion: String,
    pub salario: String,
    pub id_rol: String,
}

super::impl_draft!(EmployeeDraft {
    "nombre" => nombre,
    "apellido" => apellido,
    "telefono" => telefono,
    "correo" => correo,
    "contrasenia" => contrasenia,
    "fechaContratacion" => fecha_contratacion,
    "salario" => salario,
    "idRol" => id_rol,
});

impl Resource for Employees {
    type Entity = Employee;
    type Draft = EmployeeDraft;
    type Record = EmployeeRecord;
    type Payload = EmployeePayload;

    const KIND: &'static str = "employee";
    const ENDPOINT: &'static str = EMPLOYEES;
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "nombre",
        "apellido",
        "telefono",
        "correo",
        "fechaContratacion",
        "salario",
        "idRol",
    ];

    fn id(entity: &Employee) -> EntityId {
        entity.id
    }

    fn draft_from(e: &Employee) -> EmployeeDraft {
        EmployeeDraft {
            nombre: e.first_name.clone(),
            apellido: e.last_name.clone(),
            telefono: e.phone.clone(),
            correo: e.email.clone(),
            contrasenia: String::new(),
            fecha_contratacion: e.hired_at.map(format_datetime).unwrap_or_default(),
            salario: e.salary.to_string(),
            id_rol: opt_text(e.role_id),
        }
    }

    fn to_payload(d: &EmployeeDraft, editing: Option<EntityId>) -> Result<EmployeePayload, CoreError> {
        let correo = d.correo.trim();
        if !correo.contains('@') {
            return Err(CoreError::validation("correo: not a valid e-mail address"));
        }
        let hired = parse_datetime(&d.fecha_contratacion).ok_or_else(|| {
            CoreError::validation(format!(
                "fechaContratacion: '{}' is not a date",
                d.fecha_contratacion.trim()
            ))
        })?;
        let salario = parse_amount("salario", &d.salario)?;
        non_negative("salario", salario)?;
        let id_rol: i64 = parse_number("idRol", &d.id_rol)?;

        let contrasenia = Some(d.contrasenia.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_owned);
        if editing.is_none() && contrasenia.is_none() {
            return Err(CoreError::validation("contrasenia: required for a new employee"));
        }

        Ok(EmployeePayload {
            nombre: d.nombre.trim().to_owned(),
            apellido: d.apellido.trim().to_owned(),
            telefono: d.telefono.trim().to_owned(),
            correo: correo.to_owned(),
            contrasenia,
            fecha_contratacion: format_datetime(hired),
            salario,
            id_rol,
            rol_id_rol: id_rol,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resource::Draft;

    fn draft() -> EmployeeDraft {
        let mut d = EmployeeDraft::default();
        for (k, v) in [
            ("nombre", "Laura"),
            ("apellido", "Méndez"),
            ("telefono", "555-0101"),
            ("correo", "laura@taller.mx"),
            ("fechaContratacion", "2023-08-01T09:00:00.000"),
            ("salario", "12500.50"),
            ("idRol", "2"),
        ] {
            d.set(k, v).unwrap();
        }
        d
    }

    #[test]
    fn password_required_only_on_create() {
        let d = draft();
        assert!(Employees::to_payload(&d, None).is_err());
        let update = Employees::to_payload(&d, Some(EntityId::new(5))).unwrap();
        assert_eq!(update.contrasenia, None);
        assert_eq!(update.rol_id_rol, 2);
        assert_eq!(update.fecha_contratacion, "2023-08-01T09:00:00");
    }

    #[test]
    fn email_must_contain_at() {
        let mut d = draft();
        d.set("contrasenia", "secreto1").unwrap();
        d.set("correo", "laura.taller.mx").unwrap();
        assert!(Employees::to_payload(&d, None).is_err());
    }

    #[test]
    fn negative_salary_is_rejected() {
        let mut d = draft();
        d.set("salario", "-1").unwrap();
        assert!(Employees::to_payload(&d, Some(EntityId::new(1))).is_err());
    }

    #[test]
    fn unchanged_edit_round_trips() {
        let employee = Employee {
            id: EntityId::new(5),
            first_name: "Laura".into(),
            last_name: "Méndez".into(),
            phone: "555-0101".into(),
            email: "laura@taller.mx".into(),
            hired_at: crate::convert::parse_datetime("2023-08-01T09:00:00.5"),
            salary: 12500.5,
            role_id: Some(EntityId::new(2)),
        };
        let d = Employees::draft_from(&employee);
        let payload = Employees::to_payload(&d, Some(employee.id)).unwrap();
        assert_eq!(payload.nombre, "Laura");
        assert_eq!(payload.correo, "laura@taller.mx");
        assert_eq!(payload.contrasenia, None);
        assert_eq!(payload.fecha_contratacion, "2023-08-01T09:00:00");
        assert!((payload.salario - 12500.5).abs() < f64::EPSILON);
        assert_eq!(payload.id_rol, 2);
        assert_eq!(payload.rol_id_rol, 2);
    }
}
