//! Persisted session for reuse across runs.
//!
//! File location: `<config_dir>/session.json`
//!
//! The file holds bearer and refresh tokens. It is written only when
//! `session.persist` is enabled and removed on sign-out.

use std::path::{Path, PathBuf};

use rw_config::{Config, ConfigError, ConfigErrorResult};
use rw_core::Session;

const SESSION_FILENAME: &str = "session.json";

#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// Session file in the resolved config directory
    pub fn new() -> ConfigErrorResult<Self> {
        let config_dir = Config::config_dir()?;
        Ok(Self::in_dir(&config_dir))
    }

    /// Session file in a specific directory (for tests).
    pub fn in_dir(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join(SESSION_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `Ok(None)` if the file does not exist.
    /// Returns `Err` if the file exists but cannot be read or parsed.
    pub fn load(&self) -> ConfigErrorResult<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        let session: Session = serde_json::from_str(&content).map_err(|e| {
            ConfigError::session(format!(
                "Invalid session file {}: {e}",
                self.path.display()
            ))
        })?;

        Ok(Some(session))
    }

    /// Write the session, creating the parent directory if needed
    pub fn save(&self, session: &Session) -> ConfigErrorResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.exists()
        {
            std::fs::create_dir_all(dir).map_err(|e| ConfigError::Io {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }

        let content = serde_json::to_string_pretty(session)
            .map_err(|e| ConfigError::session(format!("Failed to serialize session: {e}")))?;

        std::fs::write(&self.path, content).map_err(|e| ConfigError::Io {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Delete the file. Silently succeeds if it does not exist.
    pub fn clear(&self) -> ConfigErrorResult<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|e| ConfigError::Io {
                path: self.path.clone(),
                source: e,
            })?;
        }
        Ok(())
    }
}
