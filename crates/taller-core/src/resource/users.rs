// User-account resource

use taller_api::models::{UserPayload, UserRecord};
use taller_api::resources::USERS;

use super::{Resource, flag_text, opt_text, parse_flag, parse_number, parse_optional};
use crate::error::CoreError;
use crate::model::{EntityId, User};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Marker for the user-account resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct Users;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub nombre_usuario: String,
    /// Write-only. Blank on update keeps the stored password.
    pub contrasena: String,
    /// Form-only; never sent.
    pub confirmar_contrasena: String,
    pub id_rol: String,
    pub id_empleado: String,
    pub activo: String,
}

super::impl_draft!(UserDraft {
    "nombreUsuario" => nombre_usuario,
    "contrasena" => contrasena,
    "confirmarContrasena" => confirmar_contrasena,
    "idRol" => id_rol,
    "idEmpleado" => id_empleado,
    "activo" => activo,
});

/// Shared password rule for account forms and the password-change call.
pub(crate) fn check_password(password: &str, confirmation: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::validation(format!(
            "contrasena: at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password != confirmation {
        return Err(CoreError::validation("contrasena: passwords do not match"));
    }
    Ok(())
}

impl Resource for Users {
    type Entity = User;
    type Draft = UserDraft;
    type Record = UserRecord;
    type Payload = UserPayload;

    const KIND: &'static str = "user";
    const ENDPOINT: &'static str = USERS;
    const REQUIRED_FIELDS: &'static [&'static str] = &["nombreUsuario", "idRol"];

    fn id(entity: &User) -> EntityId {
        entity.id
    }

    fn new_draft() -> UserDraft {
        UserDraft {
            activo: flag_text(true),
            ..UserDraft::default()
        }
    }

    fn draft_from(u: &User) -> UserDraft {
        UserDraft {
            nombre_usuario: u.username.clone(),
            contrasena: String::new(),
            confirmar_contrasena: String::new(),
            id_rol: opt_text(u.role_id),
            id_empleado: opt_text(u.employee_id),
            activo: flag_text(u.active),
        }
    }

    fn to_payload(d: &UserDraft, editing: Option<EntityId>) -> Result<UserPayload, CoreError> {
        let contrasena = if d.contrasena.is_empty() {
            if editing.is_none() {
                return Err(CoreError::validation("contrasena: required for a new user"));
            }
            None
        } else {
            check_password(&d.contrasena, &d.confirmar_contrasena)?;
            Some(d.contrasena.clone())
        };

        Ok(UserPayload {
            nombre_usuario: d.nombre_usuario.trim().to_owned(),
            contrasena,
            id_rol: parse_number("idRol", &d.id_rol)?,
            id_empleado: parse_optional("idEmpleado", &d.id_empleado)?,
            activo: parse_flag("activo", &d.activo, true)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resource::Draft;

    fn draft() -> UserDraft {
        let mut d = Users::new_draft();
        d.set("nombreUsuario", "mecanico1").unwrap();
        d.set("idRol", "3").unwrap();
        d
    }

    #[test]
    fn create_requires_matching_password() {
        let mut d = draft();
        assert!(Users::to_payload(&d, None).is_err());

        d.set("contrasena", "abc12").unwrap();
        d.set("confirmarContrasena", "abc12").unwrap();
        assert!(Users::to_payload(&d, None).is_err(), "too short");

        d.set("contrasena", "abc123").unwrap();
        assert!(Users::to_payload(&d, None).is_err(), "mismatch");

        d.set("confirmarContrasena", "abc123").unwrap();
        let payload = Users::to_payload(&d, None).unwrap();
        assert_eq!(payload.contrasena.as_deref(), Some("abc123"));
        assert_eq!(payload.id_empleado, None);
    }

    #[test]
    fn update_with_blank_password_omits_it() {
        let payload = Users::to_payload(&draft(), Some(EntityId::new(8))).unwrap();
        assert_eq!(payload.contrasena, None);
        assert!(payload.activo);
    }

    #[test]
    fn edit_draft_blanks_write_only_fields() {
        let user = User {
            id: EntityId::new(8),
            username: "mecanico1".into(),
            role_id: Some(EntityId::new(3)),
            employee_id: Some(EntityId::new(12)),
            active: false,
        };
        let d = Users::draft_from(&user);
        assert_eq!(d.contrasena, "");
        assert_eq!(d.confirmar_contrasena, "");
        assert_eq!(d.id_empleado, "12");
        assert_eq!(d.activo, "false");
    }

    #[test]
    fn unchanged_edit_round_trips() {
        let user = User {
            id: EntityId::new(8),
            username: "mecanico1".into(),
            role_id: Some(EntityId::new(3)),
            employee_id: None,
            active: false,
        };
        let d = Users::draft_from(&user);
        let payload = Users::to_payload(&d, Some(user.id)).unwrap();
        assert_eq!(payload.nombre_usuario, "mecanico1");
        assert_eq!(payload.contrasena, None);
        assert_eq!(payload.id_rol, 3);
        assert_eq!(payload.id_empleado, None);
        assert!(!payload.activo);
    }
}
