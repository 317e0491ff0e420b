use dnsproof_domain::Config;
use std::str::FromStr;
use tracing::Level;

/// Logs go to stderr so stdout carries only the report.
pub fn init_logging(config: &Config) {
    let level = Level::from_str(&config.logging.level).unwrap_or(Level::INFO);

    tracing_subscriber::fmt()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_max_level(level)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .init();
}
