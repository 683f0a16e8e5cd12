//! Wayfare Agents - declarative agent tree and executor seam
//!
//! The agents themselves are prompt text wired into a tree; their
//! intelligence lives behind the `AgentExecutor` trait, which is the
//! boundary to the external LLM runtime. This crate ships the tree, the
//! static prompts, a genai-backed executor, and a deterministic scripted
//! executor for tests and offline runs.

pub mod definitions;
pub mod executor;
pub mod llm;
pub mod prompts;

pub use definitions::{AgentDefinition, AgentTree, agent_tree, find_agent};
pub use executor::{AgentEvent, AgentExecutor, AgentReply, ExecutorRequest, ScriptedExecutor};
pub use llm::GenaiExecutor;
