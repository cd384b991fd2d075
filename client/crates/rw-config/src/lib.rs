mod config;
mod error;
mod hosted_config;
mod http_config;
mod log_level;
mod logging_config;
mod session_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use hosted_config::HostedConfig;
pub use http_config::HttpConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use session_config::SessionConfig;

const CONFIG_DIR_ENV: &str = "RW_CONFIG_DIR";
const CONFIG_DIR_NAME: &str = "roadwatch";
const LOCAL_CONFIG_DIR_NAME: &str = ".roadwatch";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOSTED_URL: &str = "http://127.0.0.1:54321";
const DEFAULT_PROFILE_TABLE: &str = "users";
const DEFAULT_SESSION_PERSIST: bool = true;
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;

// Session refresh margin
pub const MIN_REFRESH_MARGIN_SECS: i64 = 0;
pub const MAX_REFRESH_MARGIN_SECS: i64 = 3600;
pub const DEFAULT_REFRESH_MARGIN_SECS: i64 = 60;

// HTTP timeout
pub const MIN_HTTP_TIMEOUT_SECS: u64 = 1;
pub const MAX_HTTP_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
