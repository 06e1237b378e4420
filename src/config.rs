use std::env;
use std::time::Duration;

use crate::error::{EnvVarError, Error};

pub const BASE_URL: &str = "https://www.bungie.net/Platform";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const API_KEY_VAR: &str = "BUNGIE_API_KEY";
const TIMEOUT_VAR: &str = "BUNGIE_TIMEOUT_SECS";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub timeout: Duration,
    pub base_url: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            base_url: BASE_URL.into(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    // requires BUNGIE_API_KEY env var, BUNGIE_TIMEOUT_SECS is optional
    // can use dotenv
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let api_key = env::var(API_KEY_VAR).map_err(|e| EnvVarError::new(API_KEY_VAR, e))?;
        let mut config = Self::new(api_key);

        if let Ok(raw) = env::var(TIMEOUT_VAR) {
            let secs = raw.trim().parse::<u64>().map_err(|_| Error::InvalidTimeout {
                var: TIMEOUT_VAR.into(),
                value: raw.clone(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("key");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.base_url, "https://www.bungie.net/Platform");
    }

    #[test]
    fn test_builders() {
        let config = Config::new("key")
            .with_timeout(Duration::from_secs(5))
            .with_base_url("http://127.0.0.1:1234/Platform");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.base_url, "http://127.0.0.1:1234/Platform");
    }

    #[test]
    fn test_from_env() {
        dotenv::from_filename(".env.example").ok();
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_key, "asdf1234");
        assert_eq!(config.base_url, BASE_URL);
    }
}
