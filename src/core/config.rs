use config::builder::{ConfigBuilder, DefaultState};
use config::Config;
use serde::Deserialize;

use crate::Service;
use crate::controllers::user::SESSION_TTL_HOURS;
use crate::core::error::ConfigError;

pub(crate) const ENV_PREFIX: &str = "CONTRACTHUB";
pub(crate) const CONFIG_FILE: &str = "contracthub";

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct Args {
    pub(crate) database_host: String,
    pub(crate) database_port: u16,
    pub(crate) database_name: String,
    pub(crate) database_user: String,
    pub(crate) database_password: String,
    pub(crate) database_max_connections: u32,
    pub(crate) log_level: String,
    pub(crate) port: u16,
    pub(crate) secret: String,
    pub(crate) hash_cost: u32,
    pub(crate) token_ttl_hours: i64,
}

impl Args {
    /// Reads `contracthub.toml` (optional) and then `CONTRACTHUB_*` variables,
    /// the latter taking precedence.
    pub(crate) fn load(service: Service) -> Result<Self, ConfigError> {
        let config = defaults(service)?
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(config.try_deserialize::<Args>()?)
    }

    pub(crate) fn database_url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.database_user,
            self.database_password,
            self.database_host,
            self.database_port,
            self.database_name
        )
    }
}

fn defaults(service: Service) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("database_host", "localhost")?
        .set_default("database_port", 5432)?
        .set_default("database_max_connections", 15)?
        .set_default("log_level", "info")?
        .set_default("port", i64::from(service.default_port()))?
        .set_default("hash_cost", 12)?
        .set_default("token_ttl_hours", SESSION_TTL_HOURS)
}
