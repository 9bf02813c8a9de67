//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use bay_config::BayConfig;

#[test]
fn loads_remote_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[remote]
url = "https://shop.example.co"
anon_key = "anon-key"
schema = "service"
timeout_secs = 10
"#,
        )?;

        let config: BayConfig = Figment::from(Serialized::defaults(BayConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.remote.url, "https://shop.example.co");
        assert_eq!(config.remote.schema, "service");
        assert_eq!(config.remote.timeout_secs, 10);
        assert!(config.remote.is_configured());
        assert_eq!(config.remote.access_token, "");
        Ok(())
    });
}

#[test]
fn partial_session_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[session]
log_capacity = 250
"#,
        )?;

        let config: BayConfig = Figment::from(Serialized::defaults(BayConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.session.log_capacity, 250);
        assert_eq!(config.session.durable_log_capacity, 50);
        assert!(config.session.persist_telemetry);
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        std::fs::create_dir(jail.directory().join(".bayline")).map_err(|e| e.to_string())?;
        jail.create_file(
            ".bayline/config.toml",
            r#"
[tenancy]
profile_table = "staff_profiles"
"#,
        )?;

        let config = BayConfig::load().expect("config loads");
        assert_eq!(config.tenancy.profile_table, "staff_profiles");
        assert_eq!(config.tenancy.identity_table, "users");
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[remote]
url = "https://from-toml.example.co"
"#,
        )?;
        jail.set_env("BAYLINE_REMOTE__URL", "https://from-env.example.co");

        let config: BayConfig = Figment::from(Serialized::defaults(BayConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("BAYLINE_").split("__"))
            .extract()?;

        assert_eq!(config.remote.url, "https://from-env.example.co");
        Ok(())
    });
}
