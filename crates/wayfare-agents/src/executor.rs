//! Executor seam between the API layer and the LLM runtime
//!
//! The executor is invoked with a message and a read-only copy of the
//! session state and returns a response plus the events produced along the
//! way. Everything behind the trait is external to this system.

use anyhow::Error;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use wayfare_context::AgentRole;
use wayfare_context::builder::KEY_PERSONALIZED_CONTEXT;

/// One event emitted while processing a turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentEvent {
    /// Agent that produced the event
    pub author: String,
    /// Event content, if any
    pub content: Option<String>,
    /// RFC3339 creation time
    pub timestamp: String,
}

impl AgentEvent {
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: Some(content.into()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// The executor's answer for one turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentReply {
    /// Final response text
    pub response: String,
    /// Events relayed back to the caller
    pub events: Vec<AgentEvent>,
}

/// A single turn handed to the executor
#[derive(Debug, Clone)]
pub struct ExecutorRequest {
    /// Read-only snapshot of the session state (possibly context-enriched)
    pub session_state: Map<String, Value>,
    /// The user's message
    pub message: String,
    /// Which agent role handles the turn
    pub role: AgentRole,
}

impl ExecutorRequest {
    pub fn new(session_state: Map<String, Value>, message: impl Into<String>) -> Self {
        Self {
            session_state,
            message: message.into(),
            role: AgentRole::Root,
        }
    }

    pub fn with_role(mut self, role: AgentRole) -> Self {
        self.role = role;
        self
    }

    /// The personalized instruction injected for this request's role, if
    /// context injection has happened on the session
    pub fn personalized_instruction(&self) -> Option<&str> {
        self.session_state
            .get(KEY_PERSONALIZED_CONTEXT)?
            .get("personalized_instructions")?
            .get(self.role.as_str())?
            .as_str()
    }

    /// The traveler's name from the injected context, if present
    pub fn user_name(&self) -> Option<&str> {
        self.session_state
            .get(KEY_PERSONALIZED_CONTEXT)?
            .get("user_info")?
            .get("name")?
            .as_str()
    }
}

/// External agent runtime boundary
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    /// Process one turn and produce a reply.
    ///
    /// No timeout is imposed at this layer; callers treat any error as an
    /// internal failure of the turn.
    async fn run(&self, request: ExecutorRequest) -> Result<AgentReply, Error>;
}

/// Deterministic executor for tests and offline runs.
///
/// Echoes the message back, greeting the traveler by name when context has
/// been injected into the session.
#[derive(Debug, Default)]
pub struct ScriptedExecutor;

#[async_trait]
impl AgentExecutor for ScriptedExecutor {
    async fn run(&self, request: ExecutorRequest) -> Result<AgentReply, Error> {
        let response = match request.user_name() {
            Some(name) => format!("Hello {}! You said: {}", name, request.message),
            None => format!("You said: {}", request.message),
        };

        let event = AgentEvent::new(request.role.as_str(), response.clone());
        Ok(AgentReply {
            response,
            events: vec![event],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn injected_state() -> Map<String, Value> {
        let mut state = Map::new();
        state.insert(
            KEY_PERSONALIZED_CONTEXT.to_string(),
            json!({
                "user_info": { "name": "Maya" },
                "personalized_instructions": {
                    "root_agent": "Route with accessibility in mind."
                }
            }),
        );
        state
    }

    #[tokio::test]
    async fn test_scripted_executor_without_context() {
        let executor = ScriptedExecutor;
        let reply = executor
            .run(ExecutorRequest::new(Map::new(), "plan a trip"))
            .await
            .unwrap();

        assert_eq!(reply.response, "You said: plan a trip");
        assert_eq!(reply.events.len(), 1);
        assert_eq!(reply.events[0].author, "root_agent");
    }

    #[tokio::test]
    async fn test_scripted_executor_greets_injected_user() {
        let executor = ScriptedExecutor;
        let reply = executor
            .run(ExecutorRequest::new(injected_state(), "plan a trip"))
            .await
            .unwrap();

        assert!(reply.response.starts_with("Hello Maya!"));
    }

    #[test]
    fn test_request_reads_personalized_instruction() {
        let request = ExecutorRequest::new(injected_state(), "hi");
        assert_eq!(
            request.personalized_instruction(),
            Some("Route with accessibility in mind.")
        );

        let planning = request.with_role(AgentRole::Planning);
        assert_eq!(planning.personalized_instruction(), None);
    }
}
