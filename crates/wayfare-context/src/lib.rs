//! Wayfare Context - session state and user-context injection
//!
//! This crate projects stored user profiles into conversation session
//! state: a flattened accessibility summary, a travel-preferences summary,
//! and per-agent personalized instruction strings. Sessions are
//! process-local and never persisted.

pub mod builder;
pub mod instructions;
pub mod session;

pub use builder::{
    AccessibilitySummary, ContextBuilder, PersonalizedContext, TravelPreferencesSummary,
    UserContext, UserInfo,
};
pub use instructions::AgentRole;
pub use session::{Session, SessionRegistry};
