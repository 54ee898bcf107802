//! Layered configuration loading
//!
//! Environment variables give the base values, then the optional TOML file
//! for the current environment, then `APP__SECTION__KEY` overrides.

use config::{Config, ConfigError, Environment as EnvSource, File};
use dc_shared::config::AppConfig;

pub fn load() -> Result<AppConfig, ConfigError> {
    let base = AppConfig::from_env();
    let config_file = base.environment.config_file().to_string();

    let config: AppConfig = Config::builder()
        .add_source(Config::try_from(&base)?)
        .add_source(File::with_name(&config_file).required(false))
        .add_source(
            EnvSource::with_prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?
        .try_deserialize()?;

    if config.auth.jwt.is_using_default_secret() {
        log::warn!("JWT_SECRET_KEY not set, tokens are signed with the development secret");
    }

    Ok(config)
}
