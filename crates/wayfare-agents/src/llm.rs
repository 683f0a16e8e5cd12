//! genai-backed agent executor
//!
//! Thin bridge from the executor seam to the LLM runtime: compose the
//! system instruction (static agent prompt plus the session's personalized
//! block), make one chat call, relay the answer as a single event.

use crate::definitions;
use crate::executor::{AgentEvent, AgentExecutor, AgentReply, ExecutorRequest};
use anyhow::{Error, anyhow};
use async_trait::async_trait;
use genai::Client as GenaiClient;
use genai::chat::{ChatMessage as GenaiChatMessage, ChatRequest, ContentPart};
use tracing::{debug, info, warn};
use wayfare_common::{LlmConfig, LlmMode};

/// Executor that forwards turns to an LLM through the genai client
pub struct GenaiExecutor {
    client: GenaiClient,
    model: String,
}

impl GenaiExecutor {
    /// Create an executor from the LLM configuration.
    ///
    /// In hosted mode the project id only selects the backend; credentials
    /// are resolved by the client library from the environment.
    pub fn new(config: &LlmConfig) -> Self {
        match &config.mode {
            LlmMode::Hosted { project } => {
                info!("GenaiExecutor using hosted backend, project: {}", project);
            }
            LlmMode::ApiKey => {
                info!("GenaiExecutor using direct API-key backend");
            }
        }

        let client = GenaiClient::builder()
            .with_chat_options(genai::chat::ChatOptions {
                capture_content: Some(true),
                capture_usage: Some(true),
                ..Default::default()
            })
            .build();

        Self {
            client,
            model: config.model.clone(),
        }
    }

    /// System instruction for this turn: the agent's static prompt plus the
    /// personalized block when the session carries one
    fn system_instruction(&self, request: &ExecutorRequest) -> String {
        let base = definitions::find_agent(request.role.as_str())
            .map(|agent| agent.instruction)
            .unwrap_or_default();

        match request.personalized_instruction() {
            Some(personalized) => format!("{}\n\n{}", base, personalized),
            None => base.to_string(),
        }
    }
}

#[async_trait]
impl AgentExecutor for GenaiExecutor {
    async fn run(&self, request: ExecutorRequest) -> Result<AgentReply, Error> {
        debug!(
            "Executing turn for role {} with model {}",
            request.role, self.model
        );

        let system = self.system_instruction(&request);
        let chat_req = ChatRequest::new(vec![GenaiChatMessage::user(request.message.clone())])
            .with_system(system);

        let response = self
            .client
            .exec_chat(&self.model, chat_req, None)
            .await
            .map_err(|e| anyhow!("GenAI API error: {}", e))?;

        let mut text = String::new();
        for content in &response.content {
            if let ContentPart::Text(part) = content {
                text = part.clone();
            }
        }
        if text.is_empty() {
            warn!("LLM returned no text content for role {}", request.role);
        }

        let event = AgentEvent::new(request.role.as_str(), text.clone());
        Ok(AgentReply {
            response: text,
            events: vec![event],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, json};
    use wayfare_context::AgentRole;
    use wayfare_context::builder::KEY_PERSONALIZED_CONTEXT;

    #[test]
    fn test_system_instruction_composition() {
        let executor = GenaiExecutor::new(&LlmConfig::default());

        let mut state = Map::new();
        state.insert(
            KEY_PERSONALIZED_CONTEXT.to_string(),
            json!({
                "personalized_instructions": {
                    "planning_agent": "Maya uses a wheelchair."
                }
            }),
        );

        let request =
            ExecutorRequest::new(state, "find flights").with_role(AgentRole::Planning);
        let system = executor.system_instruction(&request);

        assert!(system.contains("accessible flights"));
        assert!(system.ends_with("Maya uses a wheelchair."));
    }

    #[test]
    fn test_system_instruction_without_context() {
        let executor = GenaiExecutor::new(&LlmConfig::default());
        let request = ExecutorRequest::new(Map::new(), "hi");
        let system = executor.system_instruction(&request);

        assert!(system.contains("inclusive travel agent"));
    }
}
