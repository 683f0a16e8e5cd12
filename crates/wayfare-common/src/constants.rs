//! Common constants used across Wayfare

/// Service name used in health responses and logs
pub const SERVICE_NAME: &str = "wayfare-travel-agent";

/// Default pagination limits for profile listings
pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const MAX_PAGE_SIZE: usize = 100;

/// Session id used when a chat request does not supply one
pub const DEFAULT_SESSION_ID: &str = "default";

/// Table holding user profile records in the document database
pub const PROFILE_TABLE: &str = "user_profiles";

/// Default LLM model identifier
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default SMTP settings for the notification tool
pub mod smtp {
    pub const DEFAULT_SERVER: &str = "smtp.gmail.com";
    pub const DEFAULT_PORT: u16 = 587;
}
