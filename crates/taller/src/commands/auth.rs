//! Session commands and the session bootstrap shared by every other
//! backend-bound command.

use std::io::IsTerminal;
use std::sync::Arc;

use secrecy::SecretString;
use tabled::Tabled;
use tracing::{debug, warn};

use taller_core::{Console, Identity, Screen};

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config::Target;
use crate::error::CliError;
use crate::output::{self, detail_lines, or_dash};

use super::util;

// ── Session bootstrap ───────────────────────────────────────────────

/// Establish a session for a non-login command.
///
/// Order: `--token` / `TALLER_TOKEN`, then the token kept in the keyring
/// by `taller login`, then a fresh login with stored credentials.
pub async fn resume(console: &Console, target: &Target, global: &GlobalOpts) -> Result<Arc<Identity>, CliError> {
    if let Some(ref token) = global.token {
        return console
            .restore(SecretString::from(token.clone()))
            .await?
            .ok_or_else(|| CliError::AuthFailed {
                message: "the backend rejected the session token".into(),
            });
    }

    if let Some(token) = taller_config::load_token(&target.profile_name) {
        if let Some(identity) = console.restore(token).await? {
            debug!(profile = %target.profile_name, "resumed stored session");
            return Ok(identity);
        }
        forget_token(&target.profile_name);
    }

    let (Ok(username), Some(password)) = (target.username(None), target.stored_password()) else {
        return Err(CliError::NotLoggedIn {
            profile: target.profile_name.clone(),
        });
    };
    debug!(profile = %target.profile_name, %username, "logging in with stored credentials");
    let identity = console.login(&username, &password).await?;
    remember_token(console, &target.profile_name);
    Ok(identity)
}

fn remember_token(console: &Console, profile: &str) {
    let Some(token) = console.session().token_slot().get() else {
        return;
    };
    if let Err(e) = taller_config::store_token(profile, &token) {
        warn!(error = %e, "could not keep the session token; later commands will log in again");
    }
}

fn forget_token(profile: &str) {
    if let Err(e) = taller_config::clear_token(profile) {
        warn!(error = %e, "could not remove the stored session token");
    }
}

// ── Commands ────────────────────────────────────────────────────────

pub async fn login(
    console: &Console,
    target: &Target,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let username = match target.username(args.username.as_deref()) {
        Ok(name) => name,
        Err(_) if std::io::stdin().is_terminal() => util::prompt_text("Username", "")?,
        Err(e) => return Err(e),
    };

    let password = match target.stored_password() {
        Some(password) => password,
        None if std::io::stdin().is_terminal() => util::prompt_secret("Password")?,
        None => {
            return Err(CliError::NoCredentials {
                profile: target.profile_name.clone(),
            });
        }
    };

    let bar = output::spinner("Logging in", global.quiet);
    let result = console.login(&username, &password).await;
    bar.finish_and_clear();
    let identity = result?;

    remember_token(console, &target.profile_name);
    if !global.quiet {
        eprintln!("✓ Logged in as {}", identity.user.username);
    }
    print_identity(&identity, global)
}

pub fn logout(console: &Console, target: &Target, global: &GlobalOpts) {
    console.logout();
    forget_token(&target.profile_name);
    if !global.quiet {
        eprintln!("✓ Logged out of profile '{}'", target.profile_name);
    }
}

pub fn whoami(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    let identity = console.current_user().ok_or_else(|| CliError::NotLoggedIn {
        profile: "current".into(),
    })?;
    print_identity(&identity, global)
}

#[derive(Tabled)]
struct ScreenRow {
    #[tabled(rename = "Comando")]
    command: String,
    #[tabled(rename = "Pantalla")]
    title: &'static str,
    #[tabled(rename = "Permiso")]
    capability: String,
}

pub fn screens(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    let screens = console.navigable_screens();
    let out = output::render_list(
        global.output,
        &screens,
        |s| ScreenRow {
            command: command_for(*s).into(),
            title: s.title(),
            capability: s.required_capability().to_string(),
        },
        |s| command_for(*s).into(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// The subcommand that opens `screen`.
fn command_for(screen: Screen) -> &'static str {
    match screen {
        Screen::Vehicles => "vehicles",
        Screen::Services => "services",
        Screen::Inventory => "inventory",
        Screen::Orders => "orders",
        Screen::Payments => "payments",
        Screen::Employees => "employees",
        Screen::Users => "users",
        Screen::Roles => "roles",
        Screen::Reports => "report",
    }
}

fn print_identity(identity: &Identity, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(
        global.output,
        identity,
        |i| {
            detail_lines(&[
                ("Usuario", i.user.username.clone()),
                ("ID", i.user.id.to_string()),
                ("Rol", or_dash(i.user.role_id)),
                ("Empleado", or_dash(i.user.employee_id)),
                (
                    "Permisos",
                    if i.permissions.is_empty() {
                        "-".into()
                    } else {
                        i.permissions.to_string()
                    },
                ),
            ])
        },
        |i| i.user.username.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
