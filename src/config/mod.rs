//! Configuration handling for the application.
//!
//! All knobs come from environment variables with sensible development
//! defaults, so the binary can be started with no configuration at all.
//! `Config::from_env` performs the loading and validates the numeric
//! values.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Environment variable names. Keeping them public lets tests refer to
/// them directly.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "FETCH_CONNECT_TIMEOUT_SECS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "FETCH_REQUEST_TIMEOUT_SECS";
pub const ENV_MAX_BODY_BYTES: &str = "FETCH_MAX_BODY_BYTES";

/// Default development values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024; // 5MB

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    connect_timeout: Duration,
    request_timeout: Duration,
    max_body_bytes: usize,
}

impl Config {
    /// Create a new config explicitly.
    pub fn new(
        bind_addr: impl Into<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
        max_body_bytes: usize,
    ) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            connect_timeout,
            request_timeout,
            max_body_bytes,
        }
    }

    /// Load from environment variables, falling back to development
    /// defaults. Fails only when a numeric variable is present but does
    /// not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let connect_timeout_secs =
            parse_env_u64(ENV_CONNECT_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS)?;
        let request_timeout_secs =
            parse_env_u64(ENV_REQUEST_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let max_body_bytes = parse_env_u64(ENV_MAX_BODY_BYTES, DEFAULT_MAX_BODY_BYTES as u64)?;

        if max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: ENV_MAX_BODY_BYTES,
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            bind_addr,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            request_timeout: Duration::from_secs(request_timeout_secs),
            max_body_bytes: max_body_bytes as usize,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Connect-phase timeout for outbound fetches.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
    /// Total request timeout for outbound fetches.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
    /// Ceiling on a fetched response body, in bytes.
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

}

/// Development defaults (mirrors `from_env` with no env overrides).
impl Default for Config {
    fn default() -> Self {
        Self::new(
            DEFAULT_BIND_ADDR,
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            DEFAULT_MAX_BODY_BYTES,
        )
    }
}

fn parse_env_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
            field: key,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Ensure environment-variable manipulating tests run serially.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            ENV_BIND_ADDR,
            ENV_CONNECT_TIMEOUT_SECS,
            ENV_REQUEST_TIMEOUT_SECS,
            ENV_MAX_BODY_BYTES,
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn defaults_when_env_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.bind_addr(), DEFAULT_BIND_ADDR);
        assert_eq!(cfg.connect_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
        assert_eq!(cfg.max_body_bytes(), DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn overrides_when_env_present() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_BIND_ADDR, "0.0.0.0:9000");
            env::set_var(ENV_REQUEST_TIMEOUT_SECS, "5");
            env::set_var(ENV_MAX_BODY_BYTES, "1024");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.max_body_bytes(), 1024);
        clear_env();
    }

    #[test]
    fn default_matches_env_free_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert_eq!(Config::default(), Config::from_env().unwrap());
    }

    #[test]
    fn rejects_unparseable_numbers() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_MAX_BODY_BYTES, "not-a-number");
        }
        assert!(Config::from_env().is_err());
        clear_env();
    }
}
