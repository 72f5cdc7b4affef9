use hanekawa_common::Config;

use tracing_subscriber::filter::LevelFilter;

use crate::Error;

fn level_filter(cfg: &Config) -> Result<LevelFilter, Error> {
    let level = match cfg.log_level.as_str() {
        "off" => LevelFilter::OFF,
        "error" => LevelFilter::ERROR,
        "warn" => LevelFilter::WARN,
        "info" => LevelFilter::INFO,
        "debug" => LevelFilter::DEBUG,
        "trace" => LevelFilter::TRACE,
        other => return Err(Error::UnknownLogLevel(other.to_string())),
    };

    Ok(level)
}

/// Installs the global subscriber. `log` records are forwarded to it as well.
pub fn init(cfg: &Config) -> Result<(), Error> {
    let level = level_filter(cfg)?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .try_init()
        .map_err(|e| Error::Subscriber(e.to_string()))?;

    tracing::info!(%level, "logging initialized");

    Ok(())
}
