use thiserror::Error;

use crate::motion::KeyframeError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid keyframes: {0}")]
    Keyframes(#[from] KeyframeError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scroll offset: {0}")]
    InvalidOffset(String),

    #[error("Invalid easing: {0}")]
    InvalidEasing(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, Error>;
