//! HTTP API modules
//!
//! Request/response models and handlers. Handlers translate domain results
//! into status codes; the services below them never surface storage errors.

pub mod chat;
pub mod info;
pub mod users;

use axum::Json;
use axum::http::StatusCode;
use std::sync::Arc;
use wayfare_agents::AgentExecutor;
use wayfare_common::SmtpConfig;
use wayfare_context::{ContextBuilder, SessionRegistry};
use wayfare_profile::ProfileService;

/// Shared state for all API endpoints, owned by main and injected into
/// handlers
pub struct AppState {
    pub profiles: Arc<ProfileService>,
    pub sessions: Arc<SessionRegistry>,
    pub context: Arc<ContextBuilder>,
    pub executor: Arc<dyn AgentExecutor>,
    pub smtp: SmtpConfig,
}

/// Error responses carry a JSON `detail` string
pub type ApiError = (StatusCode, Json<serde_json::Value>);

pub fn api_error(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (
        status,
        Json(serde_json::json!({ "detail": detail.into() })),
    )
}
