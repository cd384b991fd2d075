use crate::{ConfigError, ConfigErrorResult, DEFAULT_HOSTED_URL, DEFAULT_PROFILE_TABLE};

use serde::Deserialize;

/// Hosted auth + database backend
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct HostedConfig {
    /// Project URL, e.g. `http://localhost:54321`
    pub url: String,
    /// Public (anon) API key sent as `apikey`
    pub anon_key: String,
    /// Table holding `{id, email, name, role}` profile rows
    pub profile_table: String,
}

impl Default for HostedConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_HOSTED_URL),
            anon_key: String::new(),
            profile_table: String::from(DEFAULT_PROFILE_TABLE),
        }
    }
}

impl HostedConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ConfigError::hosted(format!(
                "hosted.url must start with http:// or https://, got '{}'",
                self.url
            )));
        }

        if self.anon_key.trim().is_empty() {
            return Err(ConfigError::hosted(
                "hosted.anon_key is required (set RW_HOSTED_ANON_KEY)",
            ));
        }

        let table_ok = !self.profile_table.is_empty()
            && self
                .profile_table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !table_ok {
            return Err(ConfigError::hosted(format!(
                "hosted.profile_table must be a plain identifier, got '{}'",
                self.profile_table
            )));
        }

        Ok(())
    }

    /// URL without trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

impl std::fmt::Debug for HostedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostedConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .field("profile_table", &self.profile_table)
            .finish()
    }
}
