use crate::{
    CONFIG_DIR_ENV, CONFIG_DIR_NAME, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    HostedConfig, HttpConfig, LOCAL_CONFIG_DIR_NAME, LoggingConfig, SessionConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub hosted: HostedConfig,
    pub session: SessionConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Resolve the config directory (see `config_dir()`)
    /// 2. Load config.toml if it exists, else use defaults
    /// 3. Apply RW_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;
        Self::load_from(&config_dir)
    }

    /// Load from an explicit directory (no directory creation).
    pub fn load_from(config_dir: &Path) -> ConfigErrorResult<Self> {
        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: RW_CONFIG_DIR > <user config dir>/roadwatch > ./.roadwatch
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        if let Some(dir) = dirs::config_dir() {
            return Ok(dir.join(CONFIG_DIR_NAME));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(LOCAL_CONFIG_DIR_NAME))
    }

    /// Create the config directory if missing and return it.
    pub fn ensure_config_dir() -> ConfigErrorResult<PathBuf> {
        let dir = Self::config_dir()?;
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|e| ConfigError::Io {
                path: dir.clone(),
                source: e,
            })?;
        }
        Ok(dir)
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.hosted.validate()?;
        self.session.validate()?;
        self.http.validate()?;
        Ok(())
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  hosted: {} (profile table '{}', anon key {})",
            self.hosted.base_url(),
            self.hosted.profile_table,
            if self.hosted.anon_key.is_empty() {
                "missing"
            } else {
                "set"
            }
        );
        info!(
            "  session: persist={}, refresh_margin={}s",
            self.session.persist, self.session.refresh_margin_secs
        );
        info!("  http: timeout={}s", self.http.timeout_secs);
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Hosted
        Self::apply_env_string("RW_HOSTED_URL", &mut self.hosted.url);
        Self::apply_env_string("RW_HOSTED_ANON_KEY", &mut self.hosted.anon_key);
        Self::apply_env_string("RW_PROFILE_TABLE", &mut self.hosted.profile_table);

        // Session
        Self::apply_env_bool("RW_SESSION_PERSIST", &mut self.session.persist);
        Self::apply_env_parse(
            "RW_SESSION_REFRESH_MARGIN_SECS",
            &mut self.session.refresh_margin_secs,
        );

        // Http
        Self::apply_env_parse("RW_HTTP_TIMEOUT_SECS", &mut self.http.timeout_secs);

        // Logging
        Self::apply_env_parse("RW_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("RW_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("RW_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
