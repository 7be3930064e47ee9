use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_point_at_local_service() {
    let settings = Settings::default();
    assert_eq!(settings.server_url, "http://127.0.0.1:8080");
    assert_eq!(settings.request_timeout(), Duration::from_secs(30));
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        "server_url = \"http://encoder.internal:9000\"\nrequest_timeout_secs = 5\n",
        Path::new("encoder.toml"),
    );
    assert_eq!(settings.server_url, "http://encoder.internal:9000");
    assert_eq!(settings.request_timeout_secs, 5);
}

#[test]
fn unreadable_file_is_ignored() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "server_url = [", Path::new("encoder.toml"));
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[
            ("ENCODER_URL", "http://plain:1"),
            ("APP__SERVER_URL", "http://prefixed:2"),
            ("APP__REQUEST_TIMEOUT_SECS", "12"),
        ]),
    );
    assert_eq!(settings.server_url, "http://prefixed:2");
    assert_eq!(settings.request_timeout_secs, 12);
}

#[test]
fn non_numeric_timeout_is_ignored() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[("APP__REQUEST_TIMEOUT_SECS", "soon")]),
    );
    assert_eq!(settings.request_timeout_secs, 30);
}

#[test]
fn load_settings_reads_file_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("encode_cli_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("encoder.toml");
    fs::write(&path, "request_timeout_secs = 3\n").expect("write settings");

    let settings = load_settings_with(&path, env_from(&[]));
    assert_eq!(settings.request_timeout_secs, 3);

    let settings = load_settings_with(&path, env_from(&[("APP__REQUEST_TIMEOUT_SECS", "9")]));
    assert_eq!(settings.request_timeout_secs, 9);

    fs::remove_dir_all(temp_root).expect("cleanup");
}
