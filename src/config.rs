// src/config.rs - Configuration management
use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub name: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            workers: None,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "db".to_string(),
            name: "postgres".to_string(),
            user: "myuser".to_string(),
            password: "mypassword".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

pub fn load_config() -> Result<Config> {
    load_env_file()?;

    let mut config = if let Ok(config_file) = env::var("CONFIG_FILE") {
        let path = Path::new(&config_file);
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", config_file))?;
        toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", config_file))?
    } else {
        Config::default()
    };

    override_with_env(&mut config);

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

fn override_with_env(config: &mut Config) {
    if let Ok(host) = env::var("BIND_ADDRESS") {
        config.server.host = host;
    }
    if let Ok(port_str) = env::var("PHARMACY_PORT") {
        if let Ok(port) = port_str.parse::<u16>() {
            config.server.port = port;
        }
    }
    if let Ok(workers_str) = env::var("PHARMACY_WORKERS") {
        if let Ok(workers) = workers_str.parse::<usize>() {
            config.server.workers = Some(workers);
        }
    }
    if let Ok(host) = env::var("DB_HOST") {
        config.database.host = host;
    }
    if let Ok(name) = env::var("DB_NAME") {
        config.database.name = name;
    }
    if let Ok(user) = env::var("DB_USER") {
        config.database.user = user;
    }
    if let Ok(password) = env::var("DB_PASS") {
        config.database.password = password;
    }
    if let Ok(max_conn_str) = env::var("DATABASE_MAX_CONNECTIONS") {
        if let Ok(max_conn) = max_conn_str.parse::<u32>() {
            config.database.max_connections = max_conn;
        }
    }
    if let Ok(min_conn_str) = env::var("DATABASE_MIN_CONNECTIONS") {
        if let Ok(min_conn) = min_conn_str.parse::<u32>() {
            config.database.min_connections = min_conn;
        }
    }
    if let Ok(level) = env::var("RUST_LOG") {
        config.logging.level = level;
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.database.max_connections < self.database.min_connections {
            return Err(anyhow::anyhow!(
                "max_connections ({}) must be >= min_connections ({})",
                self.database.max_connections,
                self.database.min_connections
            ));
        }

        if self.database.name.is_empty() || self.database.user.is_empty() {
            return Err(anyhow::anyhow!("database name and user must not be empty"));
        }

        Ok(())
    }

    pub fn print_startup_info(&self) {
        log::info!("💊 Pharmacy backend starting up...");
        log::info!("🌐 Server: {}:{}", self.server.host, self.server.port);
        log::info!(
            "💾 Database: postgres://{}@{}/{}",
            self.database.user, self.database.host, self.database.name
        );
        log::info!("📊 Logging: {} level", self.logging.level);
    }
}

pub fn load_env_file() -> Result<()> {
    if let Ok(env_file) = env::var("ENV_FILE") {
        dotenvy::from_filename(&env_file)
            .with_context(|| format!("Failed to load environment file: {}", env_file))?;
    } else if Path::new(".env").exists() {
        dotenvy::dotenv().context("Failed to load .env file")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.host, "db");
        assert_eq!(config.database.name, "postgres");
        assert_eq!(config.database.user, "myuser");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.min_connections, 1);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        // Некорректные соединения БД
        config.database.max_connections = 1;
        config.database.min_connections = 5;
        assert!(config.validate().is_err());

        config.database.max_connections = 10;
        config.database.min_connections = 1;
        config.database.name = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_override() {
        env::set_var("DB_HOST", "localhost");
        env::set_var("DB_NAME", "pharmacy_test");
        env::set_var("PHARMACY_PORT", "9090");

        let mut config = Config::default();
        override_with_env(&mut config);

        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.name, "pharmacy_test");
        assert_eq!(config.server.port, 9090);

        env::remove_var("DB_HOST");
        env::remove_var("DB_NAME");
        env::remove_var("PHARMACY_PORT");
    }

    #[test]
    fn test_env_override_ignores_garbage_port() {
        env::set_var("PHARMACY_WORKERS", "not-a-number");

        let mut config = Config::default();
        override_with_env(&mut config);
        assert_eq!(config.server.workers, None);

        env::remove_var("PHARMACY_WORKERS");
    }
}
