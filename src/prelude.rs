//! Convenience re-exports for common use.

pub use crate::agent::{AgentSpec, PromptSource, SupervisorSpec, SwarmSpec};
pub use crate::aggregate::{Aggregator, Emission, SessionPhase};
pub use crate::config::RuntimeConfig;
pub use crate::error::{ConciergeError, Result};
pub use crate::runtime::{AgentRuntime, ChunkStream, RunInput, SessionConfig};
pub use crate::session::{ResumePolicy, Session};
pub use crate::tools::{FnTool, Tool, ToolContext, ToolParameters, ToolReply};
pub use crate::types::{
    ChatMessage, ContentBlock, IntermediateStep, InterruptPrompt, MessageContent,
    ResumeCommand, Role, RunUpdate, RuntimeMessage, StepAction,
};
