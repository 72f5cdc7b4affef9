use hanekawa_common::{Config, ConfigError};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;

const CONFIG_FILE: &str = "hanekawa.toml";
const ENV_PREFIX: &str = "HKW_";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    Load(#[from] Box<figment::Error>),
    #[error("config error: {0}")]
    Invalid(#[from] ConfigError),
}

/// Defaults, overridden by `hanekawa.toml`, overridden by `HKW_` prefixed
/// environment variables.
pub fn figment() -> Figment {
    Figment::from(Serialized::defaults(Config::default_config()))
        .merge(Toml::file(CONFIG_FILE))
        .merge(Env::prefixed(ENV_PREFIX))
}

pub fn load_config() -> Result<Config, Error> {
    let cfg: Config = figment().extract().map_err(Box::new)?;
    cfg.validate()?;

    Ok(cfg)
}
