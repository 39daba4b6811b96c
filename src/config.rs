use anyhow::{Context, Result};
use dotenvy::dotenv;
use sqlx::mysql::MySqlSslMode;
use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,

    // Record store
    pub db_host: String,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_port: u16,
    pub db_ssl_mode: MySqlSslMode,
    pub db_max_connections: u32,
    pub run_migrations: bool,

    // Rate limiting
    pub rate_login_per_min: u32,

    pub api_prefix: String,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server_addr: var("SERVER_ADDR", "0.0.0.0:3001"),

            db_host: var("DB_HOST", "localhost"),
            db_user: var("DB_USER", "root"),
            db_password: var("DB_PASSWORD", ""),
            db_name: var("DB_NAME", "finance_system"),
            db_port: parse_var("DB_PORT", &var("DB_PORT", "3306"))?,
            db_ssl_mode: MySqlSslMode::from_str(&var("DB_SSL_MODE", "preferred"))
                .context("DB_SSL_MODE must be one of disabled, preferred, required, verify_ca, verify_identity")?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", &var("DB_MAX_CONNECTIONS", "5"))?,
            run_migrations: parse_bool("RUN_MIGRATIONS", &var("RUN_MIGRATIONS", "true"))?,

            rate_login_per_min: parse_var("RATE_LOGIN_PER_MIN", &var("RATE_LOGIN_PER_MIN", "60"))?,

            api_prefix: var("API_PREFIX", "/api"),
            log_dir: var("LOG_DIR", "logs"),
        })
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("{key} has an invalid value: {raw:?}"))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("{key} must be a boolean, got {raw:?}"),
    }
}
