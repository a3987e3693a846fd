//! Profile + flag resolution into a `taller_core::ConsoleConfig`.
//!
//! Thin layer over `taller-config`: the file format and credential chain
//! live there, this module applies the CLI's overrides on top.

use std::time::Duration;

use secrecy::SecretString;

use taller_config::{Config, ConfigError, Profile};
use taller_core::{ConsoleConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Everything a command needs to reach one backend.
#[derive(Debug)]
pub struct Target {
    pub profile_name: String,
    /// `None` when the backend came from `--server` alone.
    pub profile: Option<Profile>,
    pub console: ConsoleConfig,
}

impl Target {
    /// Username for a fresh login: flag, then profile / `TALLER_USERNAME`.
    pub fn username(&self, flag: Option<&str>) -> Result<String, CliError> {
        if let Some(name) = flag {
            return Ok(name.to_owned());
        }
        let fallback = Profile::default();
        let profile = self.profile.as_ref().unwrap_or(&fallback);
        Ok(taller_config::resolve_username(profile, &self.profile_name)?)
    }

    /// Password from the credential chain, if one is configured.
    pub fn stored_password(&self) -> Option<SecretString> {
        let fallback = Profile::default();
        let profile = self.profile.as_ref().unwrap_or(&fallback);
        taller_config::resolve_password(profile, &self.profile_name).ok()
    }
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Build the backend target from the config file, profile, and CLI overrides.
pub fn resolve_target(global: &GlobalOpts) -> Result<Target, CliError> {
    let cfg = taller_config::load_config()?;
    resolve_target_with(global, &cfg)
}

pub fn resolve_target_with(global: &GlobalOpts, cfg: &Config) -> Result<Target, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let Some(profile) = cfg.profiles.get(&profile_name) else {
        // An explicitly requested profile must exist.
        if global.profile.is_some() && global.server.is_none() {
            return Err(ConfigError::ProfileNotFound {
                name: profile_name,
                available: cfg.profiles.keys().cloned().collect(),
            }
            .into());
        }
        return from_flags(global, profile_name);
    };

    let mut profile = profile.clone();
    // Flag > env > profile
    if let Some(ref server) = global.server {
        profile.server.clone_from(server);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    let console = taller_config::profile_to_console_config(&profile, &cfg.defaults)?;
    Ok(Target {
        profile_name,
        profile: Some(profile),
        console,
    })
}

/// No profile on file: the backend must come from `--server`.
fn from_flags(global: &GlobalOpts, profile_name: String) -> Result<Target, CliError> {
    let url_str = global.server.as_deref().ok_or_else(|| CliError::NoConfig {
        path: taller_config::config_path().display().to_string(),
    })?;

    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let mut console = ConsoleConfig::new(url);
    if global.insecure {
        console.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(timeout) = global.timeout {
        console.timeout = Duration::from_secs(timeout);
    }

    Ok(Target {
        profile_name,
        profile: None,
        console,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["taller"];
        argv.extend_from_slice(args);
        argv.push("whoami");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with_profile() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                server: "https://taller.local:5001".into(),
                username: Some("recepcion".into()),
                timeout: Some(12),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn flags_override_profile() {
        let g = global(&["--server", "http://10.0.0.9:8080", "-k", "--timeout", "3"]);
        let target = resolve_target_with(&g, &config_with_profile()).unwrap();
        assert_eq!(target.profile_name, "default");
        assert_eq!(target.console.url.as_str(), "http://10.0.0.9:8080/");
        assert_eq!(target.console.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(target.console.timeout, Duration::from_secs(3));
        assert_eq!(target.username(None).unwrap(), "recepcion");
        assert_eq!(target.username(Some("otro")).unwrap(), "otro");
    }

    #[test]
    fn profile_values_apply_without_flags() {
        let target = resolve_target_with(&global(&[]), &config_with_profile()).unwrap();
        assert_eq!(target.console.url.as_str(), "https://taller.local:5001/");
        assert_eq!(target.console.timeout, Duration::from_secs(12));
        assert_eq!(target.console.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn server_flag_alone_is_enough() {
        let target = resolve_target_with(&global(&["-S", "http://localhost:5000"]), &Config::default())
            .unwrap();
        assert!(target.profile.is_none());
        assert_eq!(target.console.timeout, Duration::from_secs(30));
    }

    #[test]
    fn nothing_configured_is_no_config() {
        let err = resolve_target_with(&global(&[]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn unknown_explicit_profile_is_reported() {
        let err = resolve_target_with(&global(&["-p", "sucursal"]), &config_with_profile()).unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound { ref name, .. } if name == "sucursal"));
    }
}
