use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime settings, read once at startup.
///
/// Each field is overridden by the environment variable of the same name in
/// upper case (`DATABASE_URL`, `PORT`, `DB_CONNECT_TIMEOUT_SECS`, ...).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub port: u16,
    /// How long to wait for the store to hand out a connection.
    pub db_connect_timeout_secs: u64,
    /// Upper bound for a single statement on an open connection.
    pub db_statement_timeout_secs: u64,
    pub db_max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: "postgres://localhost:5432/employeeDB".to_string(),
            bind_address: "127.0.0.1".to_string(),
            port: 5000,
            db_connect_timeout_secs: 30,
            db_statement_timeout_secs: 30,
            db_max_connections: 5,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, figment::Error> {
        Self::figment()
            .merge(Env::raw().only(&[
                "database_url",
                "bind_address",
                "port",
                "db_connect_timeout_secs",
                "db_statement_timeout_secs",
                "db_max_connections",
            ]))
            .extract()
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.db_connect_timeout_secs)
    }

    pub fn statement_timeout(&self) -> Duration {
        Duration::from_secs(self.db_statement_timeout_secs)
    }
}
