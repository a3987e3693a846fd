//! Config subcommand handlers. None of these talk to the backend.

use dialoguer::{Input, Select};
use secrecy::{ExposeSecret, SecretString};

use taller_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::active_profile_name;
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of `cfg` safe to print: stored passwords become `****`.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some("****".into());
        }
    }
    cfg
}

fn format_config(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "server = \"{}\"", p.server);
        if let Some(ref u) = p.username {
            let _ = writeln!(out, "username = \"{u}\"");
        }
        if let Some(ref pw) = p.password {
            let _ = writeln!(out, "password = \"{pw}\"");
        }
        if let Some(ref env) = p.password_env {
            let _ = writeln!(out, "password_env = \"{env}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}

/// Keyring first; plaintext only on request.
fn store_password_choice(profile_name: &str, password: &SecretString) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
        "Don't store it; ask at login",
    ];
    let selection = Select::new()
        .with_prompt("Where to keep the password?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(CliError::prompt)?;

    match selection {
        0 => {
            taller_config::store_password(profile_name, password)?;
            eprintln!("   ✓ Password stored in system keyring");
            Ok(None)
        }
        1 => Ok(Some(password.expose_secret().to_owned())),
        _ => Ok(None),
    }
}

fn prompt_password() -> Result<SecretString, CliError> {
    let password = rpassword::prompt_password("Password: ").map_err(CliError::prompt)?;
    if password.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(SecretString::from(password))
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = taller_config::config_path();
            let mut cfg = taller_config::load_config_or_default();
            eprintln!("taller configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default(active_profile_name(global, &cfg))
                .interact_text()
                .map_err(CliError::prompt)?;

            let server: String = Input::new()
                .with_prompt("Backend URL")
                .default("https://localhost:5001".into())
                .validate_with(|s: &String| {
                    url::Url::parse(s).map(|_| ()).map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(CliError::prompt)?;

            let username: String = Input::new()
                .with_prompt("Username (empty to skip)")
                .allow_empty(true)
                .interact_text()
                .map_err(CliError::prompt)?;

            let password = if username.is_empty() {
                None
            } else {
                let secret = prompt_password()?;
                store_password_choice(&profile_name, &secret)?
            };

            let insecure = server.starts_with("https://")
                && Select::new()
                    .with_prompt("Certificate verification")
                    .items(&["Verify (recommended)", "Accept self-signed certificates"])
                    .default(0)
                    .interact()
                    .map_err(CliError::prompt)?
                    == 1;

            cfg.profiles.insert(
                profile_name.clone(),
                Profile {
                    server,
                    username: Some(username).filter(|u| !u.is_empty()),
                    password,
                    insecure: insecure.then_some(true),
                    ..Profile::default()
                },
            );
            if cfg.profiles.len() == 1 || cfg.default_profile.is_none() {
                cfg.default_profile = Some(profile_name.clone());
            }

            let path = taller_config::save_config(&cfg)?;
            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("  Profile: {profile_name}");
            eprintln!("\n  Next: taller login");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&taller_config::load_config()?);
            let out = output::render_single(global.output, &cfg, format_config, |c| {
                c.profiles.keys().cloned().collect::<Vec<_>>().join("\n")
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = taller_config::load_config()?;
            let default = active_profile_name(global, &cfg);
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: taller config init");
            } else {
                for name in cfg.profiles.keys() {
                    let marker = if *name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ──────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = taller_config::load_config()?;
            cfg.set_default(&name)?;
            taller_config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Default profile set to '{name}'");
            }
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", taller_config::config_path().display());
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword => {
            let cfg = taller_config::load_config()?;
            let profile_name = active_profile_name(global, &cfg);
            cfg.profile(&profile_name)?;

            let password = prompt_password()?;
            taller_config::store_password(&profile_name, &password)?;
            if !global.quiet {
                eprintln!("✓ Password for profile '{profile_name}' stored in system keyring");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                server: "https://taller.local".into(),
                username: Some("admin".into()),
                password: Some("hunter2".into()),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn show_never_prints_passwords() {
        let cfg = redacted(&sample());
        let text = format_config(&cfg);
        assert!(text.contains("password = \"****\""));
        assert!(!text.contains("hunter2"));
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(!json.contains("hunter2"));
    }

    #[test]
    fn show_lists_profile_server() {
        let text = format_config(&sample());
        assert!(text.contains("[profiles.default]"));
        assert!(text.contains("server = \"https://taller.local\""));
    }
}
