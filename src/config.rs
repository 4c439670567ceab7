use std::net::IpAddr;

use crate::auth::Argon2Hasher;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub db_max_connections: u32,
    pub log_level: String,
    pub password: PasswordConfig,
}

#[derive(Debug, Clone)]
pub struct PasswordConfig {
    pub min_length: usize,
    pub argon2_memory_kib: u32,
    pub argon2_iterations: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        PasswordConfig {
            min_length: 7,
            argon2_memory_kib: 19 * 1024,
            argon2_iterations: 2,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;

        let host: IpAddr = env_or("RESETPASS_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid RESETPASS_HOST: {e}"))?;

        let port: u16 = env_or("RESETPASS_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid RESETPASS_PORT: {e}"))?;

        let max_body_size: usize = env_or("RESETPASS_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid RESETPASS_MAX_BODY_SIZE: {e}"))?;

        let db_max_connections: u32 = env_or("RESETPASS_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid RESETPASS_DB_MAX_CONNECTIONS: {e}"))?;

        let log_level = env_or("RESETPASS_LOG_LEVEL", "info");

        let defaults = PasswordConfig::default();
        let password = PasswordConfig {
            min_length: env_or(
                "RESETPASS_PASSWORD_MIN_LENGTH",
                &defaults.min_length.to_string(),
            )
            .parse()
            .map_err(|e| format!("Invalid RESETPASS_PASSWORD_MIN_LENGTH: {e}"))?,
            argon2_memory_kib: env_or(
                "RESETPASS_ARGON2_MEMORY_KIB",
                &defaults.argon2_memory_kib.to_string(),
            )
            .parse()
            .map_err(|e| format!("Invalid RESETPASS_ARGON2_MEMORY_KIB: {e}"))?,
            argon2_iterations: env_or(
                "RESETPASS_ARGON2_ITERATIONS",
                &defaults.argon2_iterations.to_string(),
            )
            .parse()
            .map_err(|e| format!("Invalid RESETPASS_ARGON2_ITERATIONS: {e}"))?,
        };

        Argon2Hasher::from_config(&password)
            .map_err(|e| format!("Invalid RESETPASS_ARGON2_* settings: {e}"))?;

        Ok(Config {
            database_url,
            host,
            port,
            max_body_size,
            db_max_connections,
            log_level,
            password,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
