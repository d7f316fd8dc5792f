/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for background tasks, in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Maximum database pool size (default: `20`).
    pub db_max_connections: u32,
    /// Interval between full status-cache resyncs, in seconds (default: `300`).
    pub cache_resync_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                       |
    /// | `DB_MAX_CONNECTIONS`    | `20`                       |
    /// | `CACHE_RESYNC_SECS`     | `300`                      |
    ///
    /// Panics on unparseable values, or a zero `CACHE_RESYNC_SECS`, so
    /// misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            host,
            port: parse_env("PORT", 3000),
            cors_origins,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: parse_env("SHUTDOWN_TIMEOUT_SECS", 30),
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 20),
            cache_resync_secs: require_nonzero(
                "CACHE_RESYNC_SECS",
                parse_env("CACHE_RESYNC_SECS", 300),
            ),
        }
    }
}

fn parse_env<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{name} must be a valid {}: {e}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}

fn require_nonzero(name: &str, value: u64) -> u64 {
    if value == 0 {
        panic!("{name} must be greater than zero");
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonzero_value_passes_through() {
        assert_eq!(require_nonzero("CACHE_RESYNC_SECS", 300), 300);
    }

    #[test]
    #[should_panic(expected = "CACHE_RESYNC_SECS must be greater than zero")]
    fn zero_resync_interval_is_rejected() {
        require_nonzero("CACHE_RESYNC_SECS", 0);
    }
}
