use serde::Deserialize;

use crate::infrastructure::auth::JwtConfig;
use crate::infrastructure::storage::PostgresConfig;

/// Application configuration
///
/// Loaded from `config/default.*`, then `config/local.*`, then `APP__`
/// prefixed environment variables (`APP__DATABASE__URL`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Database settings; without a URL the in-memory store is used
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    /// Usernames registered at startup on the in-memory store
    /// (`APP__DATABASE__SEED_USERS=ash,misty`)
    pub seed_users: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 secret shared with the credential service
    pub jwt_secret: String,
    /// Allowed clock skew when checking token expiry
    pub leeway_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        let defaults = PostgresConfig::default();

        Self {
            url: None,
            max_connections: defaults.max_connections,
            min_connections: defaults.min_connections,
            connect_timeout_secs: defaults.connect_timeout_secs,
            idle_timeout_secs: defaults.idle_timeout_secs,
            seed_users: Vec::new(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        let defaults = JwtConfig::default();

        Self {
            jwt_secret: defaults.secret,
            leeway_secs: defaults.leeway_secs,
        }
    }
}

impl DatabaseConfig {
    /// PostgreSQL pool settings, if a database URL is configured
    pub fn postgres(&self) -> Option<PostgresConfig> {
        let url = self.url.as_deref().filter(|u| !u.is_empty())?;

        Some(PostgresConfig {
            url: url.to_string(),
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            connect_timeout_secs: self.connect_timeout_secs,
            idle_timeout_secs: self.idle_timeout_secs,
        })
    }
}

impl AuthConfig {
    pub fn jwt(&self) -> JwtConfig {
        JwtConfig::new(self.jwt_secret.clone()).with_leeway(self.leeway_secs)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("database.seed_users"),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_in_memory_store() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.database.postgres().is_none());
    }

    #[test]
    fn test_empty_url_means_in_memory() {
        let database = DatabaseConfig {
            url: Some(String::new()),
            ..Default::default()
        };

        assert!(database.postgres().is_none());
    }

    #[test]
    fn test_postgres_settings() {
        let database = DatabaseConfig {
            url: Some("postgres://db/teams".to_string()),
            max_connections: 4,
            ..Default::default()
        };

        let postgres = database.postgres().unwrap();
        assert_eq!(postgres.url, "postgres://db/teams");
        assert_eq!(postgres.max_connections, 4);
    }

    #[test]
    fn test_partial_sources_fill_defaults() {
        let config: AppConfig = config::Config::builder()
            .set_override("logging.format", "json")
            .unwrap()
            .set_override("auth.jwt_secret", "s3cret")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.auth.jwt().secret, "s3cret");
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.database.seed_users.is_empty());
    }

    #[test]
    fn test_seed_users_from_file() {
        let toml = r#"
            [database]
            seed_users = ["ash", "misty"]
        "#;

        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.database.seed_users, vec!["ash", "misty"]);
        assert!(config.database.postgres().is_none());
    }
}
