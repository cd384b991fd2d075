use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_REFRESH_MARGIN_SECS, DEFAULT_SESSION_PERSIST,
    MAX_REFRESH_MARGIN_SECS, MIN_REFRESH_MARGIN_SECS,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Keep the session in `<config_dir>/session.json` between runs
    pub persist: bool,
    /// Refresh tokens this many seconds before they expire
    pub refresh_margin_secs: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            persist: DEFAULT_SESSION_PERSIST,
            refresh_margin_secs: DEFAULT_REFRESH_MARGIN_SECS,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.refresh_margin_secs < MIN_REFRESH_MARGIN_SECS
            || self.refresh_margin_secs > MAX_REFRESH_MARGIN_SECS
        {
            return Err(ConfigError::session(format!(
                "session.refresh_margin_secs must be {}-{}, got {}",
                MIN_REFRESH_MARGIN_SECS, MAX_REFRESH_MARGIN_SECS, self.refresh_margin_secs
            )));
        }

        Ok(())
    }
}
