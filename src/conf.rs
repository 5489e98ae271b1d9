use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub listen_port: String,
    pub database_url: String,
    #[serde(default = "default_pool_max_connections")]
    pub database_pool_max_connections: u32,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i32,
}

fn default_pool_max_connections() -> u32 {
    5
}

fn default_token_ttl_hours() -> i32 {
    24
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .add_source(Environment::default())
            .build()?;
        let s: Settings = conf.try_deserialize()?;
        Ok(s)
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
