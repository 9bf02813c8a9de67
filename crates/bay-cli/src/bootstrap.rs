use bay_config::BayConfig;

/// Load `.env`, the TOML layers and `BAYLINE_*` overrides.
pub fn load_config() -> anyhow::Result<BayConfig> {
    BayConfig::load_with_dotenv().map_err(anyhow::Error::from)
}
