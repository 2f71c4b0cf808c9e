//! # Error Types
//!
//! Custom error types for Rover Helm using `thiserror`.

use thiserror::Error;

/// Main error type for Rover Helm
#[derive(Debug, Error)]
pub enum RoverHelmError {
    /// Pub/sub link errors (connect, publish, subscribe)
    #[error("Link error: {0}")]
    Link(String),

    /// Game controller errors
    #[error("Controller error: {0}")]
    Controller(String),

    /// No supported game controller detected on the system
    #[error("No supported game controller found")]
    ControllerNotFound,

    /// Inbound sensor payload could not be parsed
    #[error("Malformed sensor payload: {0}")]
    SensorPayload(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Rover Helm
pub type Result<T> = std::result::Result<T, RoverHelmError>;
