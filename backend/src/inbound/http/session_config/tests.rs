//! Unit tests for session configuration parsing.

use std::collections::HashMap;
use std::io::Write;

use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp key file");
    file.write_all(&vec![b'k'; len]).expect("write key");
    file
}

#[fixture]
fn full_key() -> NamedTempFile {
    key_file(SESSION_KEY_MIN_LEN)
}

fn path_of(file: &NamedTempFile) -> String {
    file.path()
        .to_str()
        .expect("temporary path should be valid UTF-8")
        .to_owned()
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn release_vars(key_path: String) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key_path),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn release_error(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match session_settings_from_env(&mock_env(vars), BuildMode::Release) {
        Ok(_) => panic!("release configuration should be rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn release_valid_settings_succeed(full_key: NamedTempFile) {
    let env = mock_env(release_vars(path_of(&full_key)));
    let settings =
        session_settings_from_env(&env, BuildMode::Release).expect("expected valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_missing_toggles_are_rejected(full_key: NamedTempFile, #[case] missing: &'static str) {
    let mut vars = release_vars(path_of(&full_key));
    vars.remove(missing);
    let err = release_error(vars);
    assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(COOKIE_SECURE_ENV, "")]
#[case(SAMESITE_ENV, "sometimes")]
#[case(ALLOW_EPHEMERAL_ENV, "perhaps")]
fn release_invalid_toggles_are_rejected(
    full_key: NamedTempFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let mut vars = release_vars(path_of(&full_key));
    vars.insert(name, value.to_owned());
    let err = release_error(vars);
    assert!(matches!(
        err,
        SessionConfigError::InvalidEnv { name: got, .. } if got == name
    ));
}

#[rstest]
fn release_ephemeral_enabled_is_rejected(full_key: NamedTempFile) {
    let mut vars = release_vars(path_of(&full_key));
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_insecure_none_same_site_is_rejected(full_key: NamedTempFile) {
    let mut vars = release_vars(path_of(&full_key));
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_missing_key_file_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent").to_string_lossy().into_owned();
    assert!(matches!(
        release_error(release_vars(missing)),
        SessionConfigError::KeyRead { .. }
    ));
}

#[rstest]
fn release_short_key_is_rejected() {
    let short = key_file(32);
    assert!(matches!(
        release_error(release_vars(path_of(&short))),
        SessionConfigError::KeyTooShort { length: 32, .. }
    ));
}

#[rstest]
fn debug_defaults_fill_every_toggle() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent").to_string_lossy().into_owned();
    let env = mock_env(HashMap::from([(KEY_FILE_ENV, missing)]));
    let settings =
        session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults should succeed");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_invalid_values_fall_back(full_key: NamedTempFile) {
    let mut vars = release_vars(path_of(&full_key));
    vars.insert(COOKIE_SECURE_ENV, "maybe".to_owned());
    vars.insert(SAMESITE_ENV, "unexpected".to_owned());
    let settings = session_settings_from_env(&mock_env(vars), BuildMode::Debug)
        .expect("debug should fall back to defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_accepts_short_keys() {
    let short = key_file(8);
    let mut vars = release_vars(path_of(&short));
    vars.insert(ALLOW_EPHEMERAL_ENV, "1".to_owned());
    assert!(session_settings_from_env(&mock_env(vars), BuildMode::Debug).is_ok());
}

#[rstest]
#[case("1", Some(true))]
#[case(" Yes ", Some(true))]
#[case("n", Some(false))]
#[case("maybe", None)]
fn booleans_accept_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}

#[rstest]
fn middleware_builds_from_settings(full_key: NamedTempFile) {
    let settings = session_settings_from_env(
        &mock_env(release_vars(path_of(&full_key))),
        BuildMode::Release,
    )
    .expect("valid settings");
    let _middleware = settings.middleware();
}
