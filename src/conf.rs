use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub service_name: String,
    pub listen_port: u16,
    pub database_url: Option<String>,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub database_pool_max_connections: u32,
    pub enable_dev_utils: bool,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(Config::builder().add_source(Environment::default()))
    }

    fn load(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let conf = builder
            .set_default("service_name", "job-board")?
            .set_default("listen_port", 3001)?
            .set_default("db_host", "localhost")?
            .set_default("db_port", 5432)?
            .set_default("db_user", "jobboard")?
            .set_default("db_password", "jobboard123")?
            .set_default("db_name", "jobboard")?
            .set_default("database_pool_max_connections", 10)?
            .set_default("enable_dev_utils", false)?
            .build()?;
        conf.try_deserialize()
    }

    /// `DATABASE_URL` wins; otherwise the connection is assembled from the `DB_*` parts.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match self.database_url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => url.parse::<PgConnectOptions>(),
            None => Ok(PgConnectOptions::new()
                .host(&self.db_host)
                .port(self.db_port)
                .username(&self.db_user)
                .password(&self.db_password)
                .database(&self.db_name)),
        }
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
