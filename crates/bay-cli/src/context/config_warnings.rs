use bay_config::BayConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &BayConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &BayConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.remote.is_configured() && has_env_prefix(&env_keys, "BAYLINE_REMOTE") {
        warnings.push(
            "Remote config appears default while BAYLINE_REMOTE* env vars exist. Use double underscores (example: BAYLINE_REMOTE__URL)."
                .to_string(),
        );
    }

    if config.remote.is_configured() && config.remote.access_token.is_empty() {
        warnings.push(
            "No remote access token set; requests run with the anon key and org context cannot be resolved."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
