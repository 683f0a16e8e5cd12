//! Chat endpoint and session introspection
//!
//! A chat turn looks up or creates the session, injects user context when a
//! user id is supplied, hands the enriched session state to the agent
//! executor, and relays the executor's events back as the response. A
//! failed injection never aborts the turn; it only drops personalization.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};
use wayfare_agents::{AgentEvent, ExecutorRequest};
use wayfare_common::{DEFAULT_SESSION_ID, truncate_string};

use super::{ApiError, AppState, api_error};

/// Incoming chat message
#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    pub message: String,
    #[serde(default = "default_session_id")]
    pub session_id: String,
    /// Optional user id for personalized responses
    #[serde(default)]
    pub user_id: Option<String>,
}

fn default_session_id() -> String {
    DEFAULT_SESSION_ID.to_string()
}

/// Summary of the injected context attached to a personalized response
#[derive(Debug, Serialize)]
pub struct UserContextInfo {
    pub user_id: String,
    pub context_injected: bool,
    pub user_name: Option<String>,
    pub accessibility_needs: bool,
}

/// Chat response body
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
    pub events: Vec<AgentEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_context: Option<UserContextInfo>,
}

/// Chat with the travel agent, with optional user context
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(message): Json<ChatMessage>,
) -> Result<Json<ChatResponse>, ApiError> {
    let session = state.sessions.get_or_create(&message.session_id).await;

    // Inject user context if a user id was provided
    let mut context_injected = false;
    if let Some(user_id) = &message.user_id {
        let mut guard = session.write().await;
        context_injected = state.context.inject(&mut guard, user_id).await;
        drop(guard);

        if context_injected {
            // Cooperating responsibility of this layer, not the builder's
            state.profiles.touch_last_active(user_id).await;
            info!(
                "Injected user context for user {} in session {}",
                user_id, message.session_id
            );
        } else {
            warn!("Failed to inject user context for user {}", user_id);
        }
    }

    info!(
        "Processing message for session {}: {}",
        message.session_id,
        truncate_string(&message.message, 120)
    );

    let session_state = session.read().await.state.clone();
    let request = ExecutorRequest::new(session_state, message.message.clone());
    let reply = state.executor.run(request).await.map_err(|e| {
        error!("Error processing chat message: {}", e);
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error processing message: {}", e),
        )
    })?;

    let user_context = if context_injected {
        let guard = session.read().await;
        state.context.get_context(&guard).map(|ctx| {
            let summary = &ctx.personalized_context.accessibility_summary;
            UserContextInfo {
                user_id: ctx.user_id.clone(),
                context_injected: true,
                user_name: Some(ctx.personalized_context.user_info.name.clone()),
                accessibility_needs: summary.has_mobility_needs || summary.has_sensory_needs,
            }
        })
    } else {
        None
    };

    Ok(Json(ChatResponse {
        response: reply.response,
        session_id: message.session_id,
        events: reply.events,
        user_context,
    }))
}

/// List active sessions
pub async fn list_sessions(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let active = state.sessions.session_ids().await;
    Json(serde_json::json!({
        "total_sessions": active.len(),
        "active_sessions": active,
    }))
}

/// Delete a specific session
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if state.sessions.remove(&session_id).await {
        Ok(Json(serde_json::json!({
            "message": format!("Session {} deleted", session_id)
        })))
    } else {
        Err(api_error(StatusCode::NOT_FOUND, "Session not found"))
    }
}

/// Create router for chat and session endpoints
pub fn chat_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/sessions", get(list_sessions))
        .route("/sessions/:id", axum::routing::delete(delete_session))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfare_agents::ScriptedExecutor;
    use wayfare_common::SmtpConfig;
    use wayfare_context::{ContextBuilder, SessionRegistry};
    use wayfare_profile::{
        AccessibilityProfile, BasicInfo, CreateProfileRequest, ProfileService,
    };

    fn test_state() -> Arc<AppState> {
        let profiles = Arc::new(ProfileService::in_memory());
        Arc::new(AppState {
            context: Arc::new(ContextBuilder::new(profiles.clone())),
            profiles,
            sessions: Arc::new(SessionRegistry::new()),
            executor: Arc::new(ScriptedExecutor),
            smtp: SmtpConfig::default(),
        })
    }

    async fn seed_profile(state: &AppState) -> String {
        state
            .profiles
            .create(CreateProfileRequest {
                basic_info: BasicInfo {
                    name: "Maya".to_string(),
                    email: "maya@example.com".to_string(),
                    age: Some(41),
                    nationality: "CA".to_string(),
                    home_location: "Toronto".to_string(),
                    phone: None,
                    emergency_contact: None,
                },
                travel_interests: None,
                accessibility_profile: Some(AccessibilityProfile {
                    mobility_needs: vec!["wheelchair_accessible".to_string()],
                    ..Default::default()
                }),
                preferences: None,
            })
            .await
            .unwrap()
            .user_id
    }

    #[tokio::test]
    async fn test_chat_with_context_injection() {
        let state = test_state();
        let user_id = seed_profile(&state).await;

        let response = chat(
            State(state.clone()),
            Json(ChatMessage {
                message: "plan a trip".to_string(),
                session_id: "s1".to_string(),
                user_id: Some(user_id.clone()),
            }),
        )
        .await
        .unwrap();

        assert!(response.0.response.starts_with("Hello Maya!"));
        assert_eq!(response.0.session_id, "s1");
        assert_eq!(response.0.events.len(), 1);

        let context = response.0.user_context.unwrap();
        assert_eq!(context.user_id, user_id);
        assert!(context.accessibility_needs);
        assert_eq!(context.user_name.as_deref(), Some("Maya"));

        // The chat turn refreshed last_active
        let profile = state.profiles.get(&user_id).await.unwrap();
        assert!(profile.last_active.is_some());
        // And the session now exists in the registry
        assert!(state.sessions.get("s1").await.is_some());
    }

    #[tokio::test]
    async fn test_chat_proceeds_without_context_for_unknown_user() {
        let state = test_state();

        let response = chat(
            State(state.clone()),
            Json(ChatMessage {
                message: "plan a trip".to_string(),
                session_id: "s1".to_string(),
                user_id: Some("missing".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.response, "You said: plan a trip");
        assert!(response.0.user_context.is_none());

        // The failed injection left no partial state behind
        let session = state.sessions.get("s1").await.unwrap();
        assert!(session.read().await.state.is_empty());
    }

    #[tokio::test]
    async fn test_chat_defaults_session_id() {
        let message: ChatMessage = serde_json::from_str("{\"message\": \"hi\"}").unwrap();
        assert_eq!(message.session_id, DEFAULT_SESSION_ID);
        assert!(message.user_id.is_none());
    }

    #[tokio::test]
    async fn test_session_listing_and_deletion() {
        let state = test_state();
        state.sessions.get_or_create("s1").await;

        let listing = list_sessions(State(state.clone())).await;
        assert_eq!(listing.0["total_sessions"], 1);

        delete_session(State(state.clone()), Path("s1".to_string()))
            .await
            .unwrap();
        let result = delete_session(State(state), Path("s1".to_string())).await;
        let (status, _) = result.err().unwrap();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
