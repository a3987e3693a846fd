//! Shared helpers for command handlers.

use std::io::IsTerminal;

use chrono::NaiveDate;
use dialoguer::{Confirm, Input};
use secrecy::SecretString;

use taller_core::{EntityId, OrderStatus};

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to ask on, destructive operations need `--yes`.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(CliError::prompt)
}

/// Ask for one text value, pre-filled with `current`.
pub fn prompt_text(label: &str, current: &str) -> Result<String, CliError> {
    Input::<String>::new()
        .with_prompt(label)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
        .map_err(CliError::prompt)
}

/// Ask for a secret without echo.
pub fn prompt_secret(label: &str) -> Result<SecretString, CliError> {
    rpassword::prompt_password(format!("{label}: "))
        .map(SecretString::from)
        .map_err(CliError::prompt)
}

pub fn id(raw: i64) -> EntityId {
    EntityId::new(raw)
}

/// Parse an optional `YYYY-MM-DD` flag.
pub fn parse_date(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, CliError> {
    raw.map(|s| {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| CliError::Validation {
            field: field.into(),
            reason: format!("'{s}' is not a date (YYYY-MM-DD)"),
        })
    })
    .transpose()
}

/// Parse an optional status flag. Labels match case-insensitively; unknown
/// values are refused so a typo does not silently filter everything out.
pub fn parse_status(raw: Option<&str>) -> Result<Option<OrderStatus>, CliError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let status = OrderStatus::from(raw.to_owned());
    if status.is_known() {
        return Ok(Some(status));
    }
    let known: Vec<String> = OrderStatus::ALL.iter().map(ToString::to_string).collect();
    Err(CliError::Validation {
        field: "status".into(),
        reason: format!("unknown status '{raw}' (expected one of: {})", known.join(", ")),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn status_flag_is_case_insensitive() {
        assert_eq!(parse_status(Some("en proceso")).unwrap(), Some(OrderStatus::InProgress));
        assert_eq!(parse_status(None).unwrap(), None);
        assert!(parse_status(Some("Terminado")).is_err());
    }

    #[test]
    fn date_flag_must_be_iso() {
        assert_eq!(
            parse_date("from", Some("2024-03-01")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert!(parse_date("from", Some("01/03/2024")).is_err());
        assert_eq!(parse_date("from", None).unwrap(), None);
    }
}
