//! Seam to the external agent-orchestration runtime.
//!
//! Everything behind [`AgentRuntime`] is a black box: the agent loop, tool
//! invocation, checkpoint persistence, and provider I/O all live in the
//! external framework. This crate only configures runs and interprets the
//! chunks the runtime streams back.

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::error::ConciergeError;
use crate::types::chat::Role;
use crate::types::update::ResumeCommand;

/// Raw update chunks as streamed by the runtime.
pub type ChunkStream = BoxStream<'static, Result<serde_json::Value, ConciergeError>>;

/// Per-call session configuration.
///
/// Mirrors the runtime's `configurable` map: the thread identifier selects
/// the checkpointed conversation, the rest parameterizes prompts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    pub thread_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recursion_limit: Option<usize>,
}

impl SessionConfig {
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            user_name: None,
            recursion_limit: None,
        }
    }

    /// Name the agent should address the user by.
    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self
    }
}

/// One input message for a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputMessage {
    pub role: Role,
    pub content: String,
}

/// Input handed to the runtime when starting a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RunInput {
    pub messages: Vec<InputMessage>,
}

impl RunInput {
    /// A run carrying a single user prompt.
    pub fn from_user(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![InputMessage {
                role: Role::User,
                content: prompt.into(),
            }],
        }
    }

    /// Append a system message (per-run instructions).
    pub fn with_system(mut self, content: impl Into<String>) -> Self {
        self.messages.push(InputMessage {
            role: Role::System,
            content: content.into(),
        });
        self
    }
}

/// The external runtime behind which orchestration lives.
///
/// `start` begins (or continues, given a known thread id) a run; `resume`
/// continues a run paused on an interrupt. Both stream raw update chunks.
/// Concurrent resumes against one thread are not guarded here.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    async fn start(
        &self,
        input: RunInput,
        session: &SessionConfig,
    ) -> Result<ChunkStream, ConciergeError>;

    async fn resume(
        &self,
        command: ResumeCommand,
        session: &SessionConfig,
    ) -> Result<ChunkStream, ConciergeError>;
}
