//! Tagged model of runtime update chunks.
//!
//! The external runtime streams untyped JSON whose shape varies by origin:
//! channel maps keyed by graph node name (`agent`, `tools`, or a named
//! sub-agent) and the out-of-band `__interrupt__` signal. [`RunUpdate`]
//! turns that into a discriminated variant so classification is exhaustive.

use serde::{Deserialize, Serialize};

use super::message::RuntimeMessage;

/// Key carrying the interrupt signal in a raw chunk.
const INTERRUPT_KEY: &str = "__interrupt__";

/// Channel names with fixed classification priority.
const AGENT_CHANNEL: &str = "agent";
const TOOLS_CHANNEL: &str = "tools";
const INTERMEDIATE_STEPS_KEY: &str = "intermediate_steps";
const GENERATED_KEY: &str = "generated";

/// A human-in-the-loop prompt carried by an interrupt chunk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterruptPrompt {
    pub value: serde_json::Value,
}

impl InterruptPrompt {
    /// The prompt as display text.
    pub fn text(&self) -> String {
        match &self.value {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

/// A tool invocation inside an intermediate reasoning step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepAction {
    pub tool: String,
    #[serde(default, rename = "toolInput")]
    pub tool_input: serde_json::Value,
}

impl StepAction {
    /// The tool input as display text.
    pub fn input_text(&self) -> String {
        match &self.tool_input {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

/// One intermediate step: a tool call and/or its observation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntermediateStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<StepAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
}

/// Command used to continue a paused run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResumeCommand {
    /// Approve the pending action as-is.
    Approve,
    /// Approve with edited arguments.
    Edit {
        args: serde_json::Map<String, serde_json::Value>,
    },
}

/// One classified channel of a runtime update chunk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum RunUpdate {
    /// The run paused awaiting external input.
    Interrupt { prompts: Vec<InterruptPrompt> },
    /// Messages from the primary agent node.
    Agent { messages: Vec<RuntimeMessage> },
    /// Tool execution results.
    Tools { messages: Vec<RuntimeMessage> },
    /// Intermediate reasoning steps: tool calls and observations.
    IntermediateSteps { steps: Vec<IntermediateStep> },
    /// Free-floating generated reasoning text.
    Generated { text: String },
    /// Messages from a named sub-agent (supervisor member or swarm peer).
    SubAgent {
        name: String,
        messages: Vec<RuntimeMessage>,
    },
}

impl RunUpdate {
    /// Flatten a raw chunk into classified updates.
    ///
    /// Order is fixed: interrupt first, then the primary agent channel,
    /// then tools, then intermediate steps and generated reasoning, then
    /// named sub-agent channels in map order. Shapes that do not match any
    /// known channel are skipped without error.
    pub fn parse_chunk(chunk: &serde_json::Value) -> Vec<RunUpdate> {
        let Some(object) = chunk.as_object() else {
            tracing::debug!(?chunk, "ignoring non-object runtime chunk");
            return Vec::new();
        };

        let mut updates = Vec::new();

        if let Some(raw) = object.get(INTERRUPT_KEY) {
            match serde_json::from_value::<Vec<InterruptPrompt>>(raw.clone()) {
                Ok(prompts) => updates.push(RunUpdate::Interrupt { prompts }),
                Err(error) => {
                    tracing::debug!(%error, "ignoring malformed interrupt payload");
                }
            }
        }

        if let Some(messages) = channel_messages(object, AGENT_CHANNEL) {
            updates.push(RunUpdate::Agent { messages });
        }
        if let Some(messages) = channel_messages(object, TOOLS_CHANNEL) {
            updates.push(RunUpdate::Tools { messages });
        }

        if let Some(raw) = object.get(INTERMEDIATE_STEPS_KEY) {
            match serde_json::from_value::<Vec<IntermediateStep>>(raw.clone()) {
                Ok(steps) => updates.push(RunUpdate::IntermediateSteps { steps }),
                Err(error) => {
                    tracing::debug!(%error, "ignoring malformed intermediate steps");
                }
            }
        }

        if let Some(raw) = object.get(GENERATED_KEY) {
            match raw.as_str() {
                Some(text) => updates.push(RunUpdate::Generated {
                    text: text.to_string(),
                }),
                None => {
                    tracing::debug!("ignoring non-string generated payload");
                }
            }
        }

        for (name, _) in object {
            if matches!(
                name.as_str(),
                INTERRUPT_KEY | AGENT_CHANNEL | TOOLS_CHANNEL | INTERMEDIATE_STEPS_KEY
                    | GENERATED_KEY
            ) {
                continue;
            }
            match channel_messages(object, name) {
                Some(messages) => updates.push(RunUpdate::SubAgent {
                    name: name.clone(),
                    messages,
                }),
                None => {
                    tracing::debug!(channel = %name, "ignoring unrecognized chunk channel");
                }
            }
        }

        updates
    }
}

/// Extract and parse the `messages` array of a named channel, if present.
fn channel_messages(
    object: &serde_json::Map<String, serde_json::Value>,
    name: &str,
) -> Option<Vec<RuntimeMessage>> {
    let raw = object.get(name)?.get("messages")?;
    match serde_json::from_value(raw.clone()) {
        Ok(messages) => Some(messages),
        Err(error) => {
            tracing::debug!(channel = %name, %error, "ignoring malformed channel messages");
            None
        }
    }
}
