//! Runtime configuration read from the environment (and `.env` when present).

use crate::error::ConfigError;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;
const DEFAULT_LOG_FILTER: &str = "jobdetails=info,tower_http=info";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// PostgreSQL URL. When unset the server runs on the in-memory store.
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub body_limit_bytes: usize,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr: SocketAddr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.into())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?;
        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => parse_positive(&v, "DATABASE_MAX_CONNECTIONS")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let body_limit_bytes = match get("REQUEST_BODY_LIMIT") {
            Some(v) => parse_positive::<usize>(&v, "REQUEST_BODY_LIMIT")?,
            None => DEFAULT_BODY_LIMIT,
        };

        Ok(AppConfig {
            database_url: get("DATABASE_URL"),
            bind_addr,
            max_connections,
            body_limit_bytes,
            log_filter: get("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.into()),
        })
    }
}

fn parse_positive<T>(value: &str, name: &'static str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let n: T = value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })?;
    if n <= T::default() {
        return Err(ConfigError::Invalid {
            name,
            reason: "must be greater than zero".into(),
        });
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert!(config.database_url.is_none());
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.body_limit_bytes, 1024 * 1024);
        assert_eq!(config.log_filter, "jobdetails=info,tower_http=info");
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/jobdetails"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ])
        .unwrap();
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/jobdetails"));
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn blank_database_url_counts_as_unset() {
        let config = config_from(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn rejects_zero_pool_size() {
        let err = config_from(&[("DATABASE_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_MAX_CONNECTIONS"));
    }

    #[test]
    fn reads_body_limit() {
        let config = config_from(&[("REQUEST_BODY_LIMIT", "65536")]).unwrap();
        assert_eq!(config.body_limit_bytes, 65536);

        let err = config_from(&[("REQUEST_BODY_LIMIT", "0")]).unwrap_err();
        assert!(err.to_string().contains("REQUEST_BODY_LIMIT"));
        assert!(config_from(&[("REQUEST_BODY_LIMIT", "lots")]).is_err());
    }

    #[test]
    fn rejects_bad_bind_addr() {
        assert!(config_from(&[("BIND_ADDR", "not-an-addr")]).is_err());
    }
}
