use std::env;

/// Runtime settings read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("LILAC_DB_MAX_CONNECTIONS must be a positive integer (got '{0}')")]
    InvalidMaxConnections(String),
    #[error("DATABASE_URL must be set to a production Postgres instance")]
    MissingDatabaseUrl,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup("DATABASE_URL").filter(|value| !value.trim().is_empty());

        let max_connections = match lookup("LILAC_DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(value) if value > 0 => value,
                _ => return Err(ConfigError::InvalidMaxConnections(raw)),
            },
            None => 5,
        };

        let log_level = lookup("LILAC_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            database: DatabaseConfig {
                url,
                max_connections,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

impl DatabaseConfig {
    pub fn require_url(&self) -> Result<&str, ConfigError> {
        self.url.as_deref().ok_or(ConfigError::MissingDatabaseUrl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_env_missing() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.database.url, None);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(
            config.database.require_url(),
            Err(ConfigError::MissingDatabaseUrl)
        );
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://lilac@localhost/lilac"),
            ("LILAC_DB_MAX_CONNECTIONS", "12"),
            ("LILAC_LOG_LEVEL", "debug"),
        ]))
        .unwrap();
        assert_eq!(
            config.database.require_url(),
            Ok("postgres://lilac@localhost/lilac")
        );
        assert_eq!(config.database.max_connections, 12);
        assert_eq!(config.telemetry.log_level, "debug");
    }

    #[test]
    fn rejects_invalid_pool_size() {
        let err = AppConfig::from_lookup(lookup_from(&[("LILAC_DB_MAX_CONNECTIONS", "0")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidMaxConnections("0".to_string()));
    }
}
