//! Wayfare Common - Shared utilities and types
//!
//! This crate provides common error types, configuration structs,
//! and domain enums used across all Wayfare components.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::{LlmConfig, LlmMode, SmtpConfig, StorageBackend, StorageConfig};
pub use constants::*;
pub use error::{Result, WayfareError};
pub use types::{BudgetRange, CommunicationStyle, Pagination, RiskTolerance, TravelStyle};
pub use utils::*;
