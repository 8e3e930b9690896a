//! Application settings loaded via OrthoConfig.
//!
//! Every value can be supplied through a `SKILLSWAP_*` environment variable,
//! a configuration file or the command line. Policy values are kept as strings
//! at this layer and parsed into domain types by the accessors so a typo is
//! reported with the offending value.

use std::net::SocketAddr;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{
    DEFAULT_MESSAGE_MAX_CHARS, DeclarationScope, DuplicateRequestPolicy, RequestPolicy,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DEMO_PASSWORD: &str = "demo123";

/// Raised when a configured value cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl SettingsError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Runtime configuration for the HTTP server and the exchange ledger.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SKILLSWAP")]
pub struct AppSettings {
    /// Socket address the server listens on.
    pub bind_addr: Option<String>,
    /// Maximum number of characters in an exchange request message.
    pub message_max_chars: Option<usize>,
    /// `reject_pending` (default) or `allow`.
    pub duplicate_requests: Option<String>,
    /// `skill_and_role` (default) or `skill`.
    pub declaration_scope: Option<String>,
    /// Seed the in-memory stores with demo members and skills on startup.
    #[ortho_config(default = false)]
    pub demo_data: bool,
    /// Shared password accepted for every member at login.
    pub demo_password: Option<String>,
}

impl AppSettings {
    /// Return the bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|err| SettingsError::invalid("bind_addr", format!("{raw}: {err}")))
    }

    /// Build the request policy from the message limit and duplicate rule.
    pub fn request_policy(&self) -> Result<RequestPolicy, SettingsError> {
        let message_max_chars = self.message_max_chars.unwrap_or(DEFAULT_MESSAGE_MAX_CHARS);
        if message_max_chars == 0 {
            return Err(SettingsError::invalid(
                "message_max_chars",
                "must be greater than zero",
            ));
        }
        let duplicate_requests = parse_or_default::<DuplicateRequestPolicy>(
            self.duplicate_requests.as_deref(),
            "duplicate_requests",
        )?;
        Ok(RequestPolicy {
            message_max_chars,
            duplicate_requests,
        })
    }

    pub fn declaration_scope(&self) -> Result<DeclarationScope, SettingsError> {
        parse_or_default(self.declaration_scope.as_deref(), "declaration_scope")
    }

    /// Return the shared login password, falling back to `demo123`.
    pub fn demo_password(&self) -> &str {
        self.demo_password
            .as_deref()
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_DEMO_PASSWORD)
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            bind_addr: None,
            message_max_chars: None,
            duplicate_requests: None,
            declaration_scope: None,
            demo_data: false,
            demo_password: None,
        }
    }
}

fn parse_or_default<T>(raw: Option<&str>, field: &'static str) -> Result<T, SettingsError>
where
    T: FromStr + Default,
    T::Err: std::fmt::Display,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(value) => value
            .parse()
            .map_err(|err: T::Err| SettingsError::invalid(field, err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "SKILLSWAP_BIND_ADDR",
        "SKILLSWAP_MESSAGE_MAX_CHARS",
        "SKILLSWAP_DUPLICATE_REQUESTS",
        "SKILLSWAP_DECLARATION_SCOPE",
        "SKILLSWAP_DEMO_DATA",
        "SKILLSWAP_DEMO_PASSWORD",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("skillswap")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert!(!settings.demo_data);
        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
        assert_eq!(
            settings.request_policy().expect("policy"),
            RequestPolicy::default()
        );
        assert_eq!(
            settings.declaration_scope().expect("scope"),
            DeclarationScope::SkillAndRole
        );
        assert_eq!(settings.demo_password(), "demo123");
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SKILLSWAP_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("SKILLSWAP_MESSAGE_MAX_CHARS", Some("280".to_owned())),
            ("SKILLSWAP_DUPLICATE_REQUESTS", Some("allow".to_owned())),
            ("SKILLSWAP_DECLARATION_SCOPE", Some("skill".to_owned())),
            ("SKILLSWAP_DEMO_DATA", Some("true".to_owned())),
            ("SKILLSWAP_DEMO_PASSWORD", Some("hunter2".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.demo_data);
        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            SocketAddr::from(([127, 0, 0, 1], 9090))
        );
        assert_eq!(
            settings.request_policy().expect("policy"),
            RequestPolicy {
                message_max_chars: 280,
                duplicate_requests: DuplicateRequestPolicy::Allow,
            }
        );
        assert_eq!(
            settings.declaration_scope().expect("scope"),
            DeclarationScope::Skill
        );
        assert_eq!(settings.demo_password(), "hunter2");
    }

    #[rstest]
    #[case(AppSettings { duplicate_requests: Some("sometimes".into()), ..AppSettings::default() }, "duplicate_requests")]
    #[case(AppSettings { message_max_chars: Some(0), ..AppSettings::default() }, "message_max_chars")]
    fn invalid_policy_values_name_the_field(
        #[case] settings: AppSettings,
        #[case] field: &str,
    ) {
        let err = settings.request_policy().expect_err("invalid policy");
        assert!(matches!(err, SettingsError::Invalid { field: f, .. } if f == field));
    }

    #[rstest]
    fn invalid_scope_and_bind_addr_are_reported() {
        let settings = AppSettings {
            bind_addr: Some("not an address".into()),
            declaration_scope: Some("role".into()),
            ..AppSettings::default()
        };
        assert!(settings.bind_addr().is_err());
        assert!(settings.declaration_scope().is_err());
    }
}
