//! Wayfare Common Error Types
//!
//! Centralized error handling for all Wayfare components

use std::fmt;

/// Main error type for Wayfare operations
#[derive(Debug)]
pub enum WayfareError {
    /// Generic error with message
    Generic(String),
    /// IO-related errors
    Io(std::io::Error),
    /// Serialization/deserialization errors
    Serde(serde_json::Error),
    /// Database/storage errors
    Storage(String),
    /// Configuration errors
    Config(String),
    /// Invalid or incomplete caller input (maps to a 4xx at the API boundary)
    Validation(String),
    /// Agent/LLM related errors
    Agent(String),
}

impl fmt::Display for WayfareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WayfareError::Generic(msg) => write!(f, "Wayfare error: {}", msg),
            WayfareError::Io(err) => write!(f, "IO error: {}", err),
            WayfareError::Serde(err) => write!(f, "Serialization error: {}", err),
            WayfareError::Storage(msg) => write!(f, "Storage error: {}", msg),
            WayfareError::Config(msg) => write!(f, "Configuration error: {}", msg),
            WayfareError::Validation(msg) => write!(f, "Validation error: {}", msg),
            WayfareError::Agent(msg) => write!(f, "Agent error: {}", msg),
        }
    }
}

impl std::error::Error for WayfareError {}

/// Convenience result type for Wayfare operations
pub type Result<T> = std::result::Result<T, WayfareError>;

// Implement From traits for common error types
impl From<std::io::Error> for WayfareError {
    fn from(err: std::io::Error) -> Self {
        WayfareError::Io(err)
    }
}

impl From<serde_json::Error> for WayfareError {
    fn from(err: serde_json::Error) -> Self {
        WayfareError::Serde(err)
    }
}

impl From<anyhow::Error> for WayfareError {
    fn from(err: anyhow::Error) -> Self {
        WayfareError::Generic(err.to_string())
    }
}
