//! Unit tests for session configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug)]
struct TempKeyFile {
    path: PathBuf,
}

impl TempKeyFile {
    fn new(len: usize) -> std::io::Result<Self> {
        let path = std::env::temp_dir().join(format!("skillswap-session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'k'; len])?;
        Ok(Self { path })
    }

    fn path_str(&self) -> &str {
        self.path
            .to_str()
            .expect("temporary path should be valid UTF-8")
    }
}

impl Drop for TempKeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn release_vars(key_path: &str) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key_path.to_owned()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

#[rstest]
fn release_accepts_complete_configuration() {
    let key_file = TempKeyFile::new(SESSION_KEY_MIN_LEN).expect("key file");
    let env = mock_env(release_vars(key_file.path_str()));

    let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
fn release_missing_cookie_secure_is_rejected() {
    let env = mock_env(HashMap::new());
    let err = session_settings_from_env(&env, BuildMode::Release)
        .err()
        .expect("missing toggle");
    assert!(matches!(
        err,
        SessionConfigError::MissingEnv {
            name: COOKIE_SECURE_ENV
        }
    ));
}

#[rstest]
#[case("maybe")]
#[case("")]
fn release_invalid_cookie_secure_is_rejected(#[case] value: &str) {
    let key_file = TempKeyFile::new(SESSION_KEY_MIN_LEN).expect("key file");
    let mut vars = release_vars(key_file.path_str());
    vars.insert(COOKIE_SECURE_ENV, value.to_owned());

    let err = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .err()
        .expect("invalid toggle");
    assert!(matches!(
        err,
        SessionConfigError::InvalidEnv {
            name: COOKIE_SECURE_ENV,
            ..
        }
    ));
}

#[rstest]
fn release_rejects_short_keys() {
    let key_file = TempKeyFile::new(SESSION_KEY_MIN_LEN - 1).expect("key file");
    let env = mock_env(release_vars(key_file.path_str()));
    let err = session_settings_from_env(&env, BuildMode::Release)
        .err()
        .expect("short key");
    assert!(matches!(err, SessionConfigError::KeyTooShort { .. }));
}

#[rstest]
fn release_rejects_ephemeral_keys() {
    let key_file = TempKeyFile::new(SESSION_KEY_MIN_LEN).expect("key file");
    let mut vars = release_vars(key_file.path_str());
    vars.insert(ALLOW_EPHEMERAL_ENV, "1".to_owned());

    let err = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .err()
        .expect("ephemeral key");
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_same_site_none_requires_secure_cookie() {
    let key_file = TempKeyFile::new(SESSION_KEY_MIN_LEN).expect("key file");
    let mut vars = release_vars(key_file.path_str());
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());

    let err = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .err()
        .expect("insecure none");
    assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn release_missing_key_file_is_rejected() {
    let vars = release_vars(&format!("/nonexistent/{}", Uuid::new_v4()));

    let err = session_settings_from_env(&mock_env(vars), BuildMode::Release)
        .err()
        .expect("missing key");
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn debug_falls_back_to_lax_secure_ephemeral_defaults() {
    let mut vars = HashMap::new();
    vars.insert(KEY_FILE_ENV, format!("/nonexistent/{}", Uuid::new_v4()));
    vars.insert(SAMESITE_ENV, "sideways".to_owned());

    let settings =
        session_settings_from_env(&mock_env(vars), BuildMode::Debug).expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("1", Some(true))]
#[case(" yes ", Some(true))]
#[case("N", Some(false))]
#[case("false", Some(false))]
#[case("2", None)]
fn parse_bool_accepts_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
