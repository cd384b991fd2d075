use rw_config::ConfigError;
use rw_session::SessionError;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Session(#[from] SessionError),

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Output error: {message} {location}")]
    Output {
        message: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, CliError>;
