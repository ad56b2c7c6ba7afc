use std::{env, fmt::Display, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set (or point SEOF_FIXTURES at a fixture file)")]
    Missing(&'static str),

    #[error("invalid {key} value: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Where list rows come from.
#[derive(Debug, Clone)]
pub enum Backend {
    Rest { url: String, anon_key: String },
    Fixtures(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub max_workers: usize,
    pub http_timeout: Duration,
    pub backend: Backend,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            info!("no .env loaded: {e}");
        }

        let backend = match var("SEOF_FIXTURES") {
            Some(path) => {
                info!(path = %path, "using fixture store");
                Backend::Fixtures(PathBuf::from(path))
            }
            None => Backend::Rest {
                url: var("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?,
                anon_key: var("SUPABASE_ANON_KEY").ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?,
            },
        };

        Ok(Self {
            bind: try_load("SEOF_BIND", "127.0.0.1:3000")?,
            max_workers: try_load("SEOF_MAX_WORKERS", "8")?,
            http_timeout: Duration::from_secs(try_load("SEOF_HTTP_TIMEOUT_SECS", "10")?),
            backend,
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key,
                message: e.to_string(),
            }
        })
}
