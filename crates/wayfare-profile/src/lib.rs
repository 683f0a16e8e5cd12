//! Wayfare Profile - User profile persistence
//!
//! This crate owns the canonical traveler profile records: the typed data
//! model, the storage backend abstraction (SurrealDB document database with
//! an in-memory fallback), and the profile service with its degradation
//! policy.

pub mod model;
pub mod service;
pub mod store;

pub use model::{
    AccessibilityProfile, BasicInfo, CreateProfileRequest, ProfileSummary, TravelInterests,
    UpdateProfileRequest, UserPreferences, UserProfile,
};
pub use service::ProfileService;
pub use store::{MemoryProfileStore, ProfileBackend, SurrealConfig, SurrealProfileStore};
