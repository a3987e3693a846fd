// ── Resource metadata ──
//
// Everything the generic controller needs to know about one entity type:
// its endpoint, id accessor, draft shape, required fields and how a
// draft is coerced into a wire payload. Each entity implements
// `Resource` on a zero-sized marker type in its own submodule.

mod employees;
mod inventory;
mod orders;
mod payments;
mod roles;
mod services;
mod users;
mod vehicles;

use std::fmt::Debug;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CoreError;
use crate::model::EntityId;

pub use employees::{EmployeeDraft, Employees};
pub use inventory::{Inventory, InventoryDraft};
pub use orders::{OrderDraft, Orders};
pub use payments::{PaymentDraft, Payments};
pub use roles::{RoleDraft, Roles};
pub use services::{ServiceDraft, Services};
pub use users::{UserDraft, Users};

pub(crate) use users::check_password;
pub use vehicles::{VehicleDraft, Vehicles};

// ── Draft ───────────────────────────────────────────────────────────

/// Editable working copy of an entity, one raw text value per field.
///
/// Field names are the backend's wire names, so a form (or `--set`
/// argument) addresses `placa`, `idVehiculo`, ... directly.
pub trait Draft: Clone + Debug + Default + PartialEq + Send + Sync + 'static {
    /// Every field, in form order.
    const FIELDS: &'static [&'static str];

    fn field(&self, name: &str) -> Option<&str>;

    fn field_mut(&mut self, name: &str) -> Option<&mut String>;

    /// Replace one field. Unknown names are a validation error.
    fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), CoreError> {
        match self.field_mut(name) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(CoreError::validation(format!(
                "unknown field '{name}' (expected one of: {})",
                Self::FIELDS.join(", ")
            ))),
        }
    }

    /// Required fields that are blank after trimming.
    fn missing(&self, required: &[&str]) -> Vec<&'static str> {
        Self::FIELDS
            .iter()
            .copied()
            .filter(|f| required.contains(f))
            .filter(|f| self.field(f).is_none_or(|v| v.trim().is_empty()))
            .collect()
    }
}

/// Implements [`Draft`] for a struct of `String` fields.
macro_rules! impl_draft {
    ($ty:ty { $($name:literal => $field:ident),+ $(,)? }) => {
        impl $crate::resource::Draft for $ty {
            const FIELDS: &'static [&'static str] = &[$($name),+];

            fn field(&self, name: &str) -> Option<&str> {
                match name {
                    $($name => Some(self.$field.as_str()),)+
                    _ => None,
                }
            }

            fn field_mut(&mut self, name: &str) -> Option<&mut String> {
                match name {
                    $($name => Some(&mut self.$field),)+
                    _ => None,
                }
            }
        }
    };
}
pub(crate) use impl_draft;

// ── Resource ────────────────────────────────────────────────────────

/// Static description of one backend entity type.
pub trait Resource: Send + Sync + 'static {
    type Entity: Clone + Debug + Send + Sync + 'static;
    type Draft: Draft;
    type Record: DeserializeOwned + Into<Self::Entity> + Send + 'static;
    type Payload: Serialize + Debug + Send + Sync + 'static;

    /// Singular noun for messages ("vehicle").
    const KIND: &'static str;
    /// Endpoint path relative to the base URL.
    const ENDPOINT: &'static str;
    /// Fields that must be non-blank before any request is sent.
    const REQUIRED_FIELDS: &'static [&'static str];

    fn id(entity: &Self::Entity) -> EntityId;

    /// Draft for a new entity, with any form defaults filled in.
    fn new_draft() -> Self::Draft {
        Self::Draft::default()
    }

    /// Field-for-field copy of `entity`. Write-only fields stay blank.
    fn draft_from(entity: &Self::Entity) -> Self::Draft;

    /// Coerce and validate `draft`. `editing` is the id being updated,
    /// `None` on create.
    fn to_payload(draft: &Self::Draft, editing: Option<EntityId>)
    -> Result<Self::Payload, CoreError>;
}

// ── Coercion helpers ────────────────────────────────────────────────

pub(crate) fn parse_number<T: FromStr>(field: &str, raw: &str) -> Result<T, CoreError> {
    raw.trim()
        .parse()
        .map_err(|_| CoreError::validation(format!("{field}: '{}' is not a valid number", raw.trim())))
}

pub(crate) fn parse_optional<T: FromStr>(field: &str, raw: &str) -> Result<Option<T>, CoreError> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        parse_number(field, raw).map(Some)
    }
}

pub(crate) fn parse_amount(field: &str, raw: &str) -> Result<f64, CoreError> {
    let value: f64 = parse_number(field, raw)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoreError::validation(format!("{field}: must be a finite amount")))
    }
}

/// Checkbox text: `true/false`, `si/no`, `1/0`. Blank uses `default`.
pub(crate) fn parse_flag(field: &str, raw: &str, default: bool) -> Result<bool, CoreError> {
    match raw.trim().to_lowercase().as_str() {
        "" => Ok(default),
        "true" | "1" | "si" | "sí" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(CoreError::validation(format!(
            "{field}: '{other}' is not a yes/no value"
        ))),
    }
}

pub(crate) fn parse_date_field(field: &str, raw: &str) -> Result<chrono::NaiveDate, CoreError> {
    crate::convert::parse_date(raw).ok_or_else(|| {
        CoreError::validation(format!("{field}: '{}' is not a date (YYYY-MM-DD)", raw.trim()))
    })
}

pub(crate) fn max_len(field: &str, raw: &str, max: usize) -> Result<(), CoreError> {
    if raw.trim().chars().count() > max {
        Err(CoreError::validation(format!(
            "{field}: at most {max} characters"
        )))
    } else {
        Ok(())
    }
}

pub(crate) fn non_negative(field: &str, value: f64) -> Result<(), CoreError> {
    if value < 0.0 {
        Err(CoreError::validation(format!("{field}: must not be negative")))
    } else {
        Ok(())
    }
}

pub(crate) fn flag_text(value: bool) -> String {
    value.to_string()
}

pub(crate) fn opt_text<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
