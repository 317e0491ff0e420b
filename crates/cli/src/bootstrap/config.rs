use anyhow::Context;
use dnsproof_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(config_path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

pub fn log_config(config: &Config) {
    info!(
        resolver = %config.resolver.url,
        timeout_secs = config.resolver.timeout_secs,
        encoding = %config.resolver.encoding,
        verify_echo = config.resolver.verify_echo,
        "Configuration loaded"
    );
}
