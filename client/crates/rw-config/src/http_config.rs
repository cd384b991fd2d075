use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HTTP_TIMEOUT_SECS, MAX_HTTP_TIMEOUT_SECS,
    MIN_HTTP_TIMEOUT_SECS,
};

use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout against the hosted backend
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl HttpConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.timeout_secs < MIN_HTTP_TIMEOUT_SECS || self.timeout_secs > MAX_HTTP_TIMEOUT_SECS {
            return Err(ConfigError::http(format!(
                "http.timeout_secs must be {}-{}, got {}",
                MIN_HTTP_TIMEOUT_SECS, MAX_HTTP_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
