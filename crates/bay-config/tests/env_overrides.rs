use figment::Jail;
use bay_config::{BayConfig, ConfigError};

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("BAYLINE_REMOTE__URL", "https://shop.example.co");
        jail.set_env("BAYLINE_REMOTE__ANON_KEY", "anon");
        jail.set_env("BAYLINE_SESSION__DURABLE_LOG_CAPACITY", "20");

        let config = BayConfig::load().expect("config loads");
        assert!(config.remote.is_configured());
        assert_eq!(config.session.durable_log_capacity, 20);
        Ok(())
    });
}

#[test]
fn invalid_capacity_from_env_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("BAYLINE_SESSION__LOG_CAPACITY", "0");

        let result = BayConfig::load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        Ok(())
    });
}
