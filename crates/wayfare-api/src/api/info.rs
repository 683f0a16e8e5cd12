//! Introspection endpoints: service index, health, and agent capabilities

use axum::{Json, Router, extract::State, routing::get};
use std::sync::Arc;
use wayfare_agents::agent_tree;
use wayfare_common::SERVICE_NAME;

use super::AppState;

/// Root endpoint with a service index
pub async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to the Wayfare Inclusive Travel Agent API",
        "description": "An AI-powered travel agent specializing in accessible travel planning",
        "version": env!("CARGO_PKG_VERSION"),
        "features": [
            "Personalized user profiles with accessibility needs",
            "Context-aware AI responses based on user preferences",
            "Specialized accessibility-focused agents",
            "Automated notifications and provider communication"
        ],
        "endpoints": {
            "chat": "/chat - Chat with personalized context",
            "users": "/users - User profile management",
            "health": "/health - Service health check",
            "sessions": "/sessions - Session management",
            "agent_info": "/agent/info - Agent capabilities"
        }
    }))
}

/// Health check, including the storage degradation signal
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "storage": state.profiles.storage_mode(),
        "email": if state.smtp.enabled { "enabled" } else { "simulated" },
    }))
}

/// Information about the agent tree and its capabilities
pub async fn agent_info() -> Json<serde_json::Value> {
    let tree = agent_tree();
    let sub_agents: Vec<serde_json::Value> = tree
        .sub_agents
        .iter()
        .map(|agent| {
            serde_json::json!({
                "name": agent.name,
                "description": agent.description,
                "tools": agent.tools.len(),
            })
        })
        .collect();

    Json(serde_json::json!({
        "agent_name": tree.root.name,
        "agent_description": tree.root.description,
        "total_sub_agents": tree.sub_agents.len(),
        "sub_agents": sub_agents,
        "accessibility_features": [
            "Comprehensive accessibility research",
            "Mobility aid preparation assistance",
            "Transit support coordination",
            "Real-time barrier navigation",
            "Accessible venue recommendations",
            "Disability-friendly travel planning"
        ],
        "personalization_features": [
            "User profile-based context injection",
            "Accessibility needs-aware responses",
            "Travel preference personalization",
            "Communication style adaptation",
            "Learned preference tracking"
        ]
    }))
}

/// Create router for introspection endpoints
pub fn info_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/agent/info", get(agent_info))
        .with_state(state)
}
