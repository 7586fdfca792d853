//! Agent configuration glue.
//!
//! Specs assemble everything the external runtime needs to build an agent,
//! a supervisor, or a swarm: model, tools, prompt, memory flag. They carry
//! no behavior of their own.

use std::sync::Arc;

use crate::config::RuntimeConfig;
use crate::runtime::SessionConfig;
use crate::tools::tool::{FnTool, Tool, ToolReply};
use crate::tools::types::ToolParameters;

/// System prompt: fixed text or resolved per-session.
#[derive(Clone)]
pub enum PromptSource {
    Static(String),
    /// Resolved against the session config at run start, e.g. to address
    /// the user by their configured name.
    Dynamic(Arc<dyn Fn(&SessionConfig) -> String + Send + Sync>),
}

impl PromptSource {
    /// Resolve the prompt for a session.
    pub fn resolve(&self, session: &SessionConfig) -> String {
        match self {
            Self::Static(prompt) => prompt.clone(),
            Self::Dynamic(build) => build(session),
        }
    }
}

impl std::fmt::Debug for PromptSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(prompt) => f.debug_tuple("Static").field(prompt).finish(),
            Self::Dynamic(_) => f.debug_tuple("Dynamic").field(&"..").finish(),
        }
    }
}

/// Recursion limit for a run capped at `max_iterations` tool rounds.
pub fn recursion_limit_for(max_iterations: usize) -> usize {
    2 * max_iterations + 1
}

/// Static wiring for a single tool-calling agent.
pub struct AgentSpec {
    pub name: Option<String>,
    pub model: String,
    pub prompt: Option<PromptSource>,
    pub tools: Vec<Arc<dyn Tool>>,
    /// Attach the runtime's checkpoint store so the thread id selects a
    /// persisted conversation.
    pub memory: bool,
    pub recursion_limit: Option<usize>,
    /// Optional JSON Schema constraining the final response.
    pub response_format: Option<serde_json::Value>,
}

impl AgentSpec {
    /// Create a spec for a model identifier, e.g. `openai:gpt-4o-mini`.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            name: None,
            model: model.into(),
            prompt: None,
            tools: Vec::new(),
            memory: false,
            recursion_limit: None,
            response_format: None,
        }
    }

    /// Create a spec using the configured default model.
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new(config.model()).with_recursion_limit(config.recursion_limit())
    }

    /// Name this agent (required for supervisor/swarm membership).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a static system prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(PromptSource::Static(prompt.into()));
        self
    }

    /// Set a prompt resolved per-session.
    pub fn with_dynamic_prompt<F>(mut self, build: F) -> Self
    where
        F: Fn(&SessionConfig) -> String + Send + Sync + 'static,
    {
        self.prompt = Some(PromptSource::Dynamic(Arc::new(build)));
        self
    }

    /// Add a tool.
    pub fn with_tool(mut self, tool: impl Tool + 'static) -> Self {
        self.tools.push(Arc::new(tool));
        self
    }

    /// Enable checkpointed memory.
    pub fn with_memory(mut self) -> Self {
        self.memory = true;
        self
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self
    }

    /// Constrain the final response to a JSON Schema.
    pub fn with_response_format(mut self, schema: serde_json::Value) -> Self {
        self.response_format = Some(schema);
        self
    }
}

impl std::fmt::Debug for AgentSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentSpec")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("prompt", &self.prompt)
            .field(
                "tools",
                &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>(),
            )
            .field("memory", &self.memory)
            .field("recursion_limit", &self.recursion_limit)
            .finish()
    }
}

/// Supervisor wiring: one routing model delegating to named agents.
#[derive(Debug)]
pub struct SupervisorSpec {
    pub model: String,
    pub prompt: Option<String>,
    pub agents: Vec<AgentSpec>,
}

impl SupervisorSpec {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: None,
            agents: Vec::new(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_agent(mut self, agent: AgentSpec) -> Self {
        self.agents.push(agent);
        self
    }
}

/// Swarm wiring: peer agents handing off to each other.
#[derive(Debug)]
pub struct SwarmSpec {
    pub agents: Vec<AgentSpec>,
    pub default_active_agent: String,
}

impl SwarmSpec {
    pub fn new(default_active_agent: impl Into<String>) -> Self {
        Self {
            agents: Vec::new(),
            default_active_agent: default_active_agent.into(),
        }
    }

    pub fn with_agent(mut self, agent: AgentSpec) -> Self {
        self.agents.push(agent);
        self
    }
}

/// Build a handoff tool stub transferring control to a named peer agent.
///
/// The actual transfer happens inside the runtime; the stub only gives the
/// model something to call.
pub fn handoff_tool(agent_name: &str, description: impl Into<String>) -> FnTool {
    let target = agent_name.to_string();
    FnTool::new(
        format!("transfer_to_{agent_name}"),
        description,
        ToolParameters::empty(),
        move |_args, _ctx| {
            let target = target.clone();
            async move { Ok(ToolReply::success(format!("Transferred to {target}"))) }
        },
    )
}
