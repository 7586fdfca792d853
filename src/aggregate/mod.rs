//! Stream classifier/aggregator.
//!
//! Consumes the heterogeneous update chunks of one streaming session and
//! converts them into an ordered sequence of renderable emissions, deduping
//! repeated message identifiers and pausing on an interrupt signal.

use std::collections::HashSet;

use futures::stream::BoxStream;
use futures::StreamExt;

use crate::error::ConciergeError;
use crate::types::chat::Role;
use crate::types::message::RuntimeMessage;
use crate::types::update::RunUpdate;

/// One renderable segment produced by the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    /// Assistant or sub-agent text.
    Text(String),
    /// Tool result text; `is_error` marks validation or execution failures
    /// so consumers can render them distinctly from success output.
    ToolOutput { text: String, is_error: bool },
    /// Human-in-the-loop prompt; the session is paused after this emission.
    Interrupt(String),
}

impl Emission {
    /// The carried text regardless of variant.
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Interrupt(text) => text,
            Self::ToolOutput { text, .. } => text,
        }
    }

    /// Whether this emission pauses the session.
    pub fn is_interrupt(&self) -> bool {
        matches!(self, Self::Interrupt(_))
    }
}

/// Session phase for the interrupt/resume bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Running,
    /// Awaiting a [`ResumeCommand`](crate::types::ResumeCommand); no
    /// emissions are produced until one arrives. There is no timeout.
    Paused,
}

/// Classifier state for one streaming session.
///
/// The processed-id set lives exactly as long as the session: created at
/// stream start, dropped at stream end. It is shared across all channels so
/// a message appearing in more than one channel's chunk emits only once.
#[derive(Debug)]
pub struct Aggregator {
    seen: HashSet<String>,
    phase: SessionPhase,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
            phase: SessionPhase::Running,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Return to `Running` after a resume command has been issued.
    pub fn resume(&mut self) {
        self.phase = SessionPhase::Running;
    }

    /// Parse a raw chunk and classify every channel it carries.
    pub fn apply_chunk(&mut self, chunk: &serde_json::Value) -> Vec<Emission> {
        RunUpdate::parse_chunk(chunk)
            .into_iter()
            .flat_map(|update| self.apply(update))
            .collect()
    }

    /// Classify one update into zero or more emissions.
    pub fn apply(&mut self, update: RunUpdate) -> Vec<Emission> {
        if self.phase == SessionPhase::Paused {
            tracing::debug!("dropping update received while paused");
            return Vec::new();
        }

        match update {
            RunUpdate::Interrupt { prompts } => {
                self.phase = SessionPhase::Paused;
                prompts
                    .iter()
                    .map(|prompt| Emission::Interrupt(prompt.text()))
                    .collect()
            }
            RunUpdate::Agent { messages } => {
                // The primary agent channel surfaces its first message only;
                // later entries repeat earlier state.
                let Some(message) = messages.into_iter().next() else {
                    return Vec::new();
                };
                if self.already_seen(&message) {
                    return Vec::new();
                }
                message
                    .content
                    .text_segments()
                    .into_iter()
                    .map(|text| Emission::Text(text.to_string()))
                    .collect()
            }
            RunUpdate::Tools { messages } => {
                let mut emissions = Vec::new();
                for message in messages {
                    if self.already_seen(&message) {
                        continue;
                    }
                    for text in message.content.text_segments() {
                        emissions.push(Emission::ToolOutput {
                            text: text.to_string(),
                            is_error: message.is_error,
                        });
                    }
                }
                emissions
            }
            RunUpdate::IntermediateSteps { steps } => {
                let mut emissions = Vec::new();
                for step in steps {
                    if let Some(action) = &step.action {
                        emissions.push(Emission::Text(format!(
                            "Using tool: {} with input: {}",
                            action.tool,
                            action.input_text()
                        )));
                    }
                    if let Some(observation) = &step.observation {
                        emissions.push(Emission::Text(format!("Tool result: {observation}")));
                    }
                }
                emissions
            }
            RunUpdate::Generated { text } => {
                if text.is_empty() {
                    return Vec::new();
                }
                vec![Emission::Text(format!("Thinking: {text}"))]
            }
            RunUpdate::SubAgent { name, messages } => {
                let mut emissions = Vec::new();
                for message in messages {
                    if self.already_seen(&message) {
                        continue;
                    }
                    // Sub-agent channels replay the full thread state,
                    // including human and tool messages; only assistant
                    // text is forwarded.
                    if message.kind != Role::Assistant {
                        continue;
                    }
                    for text in message.content.text_segments() {
                        emissions.push(Emission::Text(text.to_string()));
                    }
                }
                if !emissions.is_empty() {
                    tracing::debug!(channel = %name, count = emissions.len(), "sub-agent emissions");
                }
                emissions
            }
        }
    }

    /// Mark a message as processed; true when it was already forwarded.
    ///
    /// Messages without an identifier are never deduplicated.
    fn already_seen(&mut self, message: &RuntimeMessage) -> bool {
        match &message.id {
            Some(id) => !self.seen.insert(id.clone()),
            None => false,
        }
    }
}

/// Drain an emission stream into the concatenated text a client would have
/// rendered, stopping at the first error.
pub async fn collect_text(
    mut stream: BoxStream<'static, Result<Emission, ConciergeError>>,
) -> Result<String, ConciergeError> {
    let mut text = String::new();
    while let Some(item) = stream.next().await {
        text.push_str(item?.text());
    }
    Ok(text)
}

/// Lazily aggregate a raw chunk stream into an emission stream.
///
/// The output ends when the source closes, errors, or pauses on an
/// interrupt; after an interrupt the final emission is the prompt and no
/// further chunks are pulled. Splicing a resumed source onto the same
/// processed-id set is the session driver's job
/// ([`Session`](crate::session::Session)).
pub fn aggregate(
    stream: BoxStream<'static, Result<serde_json::Value, ConciergeError>>,
) -> BoxStream<'static, Result<Emission, ConciergeError>> {
    let aggregated = async_stream::stream! {
        let mut aggregator = Aggregator::new();
        let mut inner = std::pin::pin!(stream);
        while let Some(item) = inner.next().await {
            match item {
                Ok(chunk) => {
                    for emission in aggregator.apply_chunk(&chunk) {
                        yield Ok(emission);
                    }
                    if aggregator.phase() == SessionPhase::Paused {
                        break;
                    }
                }
                Err(e) => {
                    yield Err(e);
                    break;
                }
            }
        }
    };
    Box::pin(aggregated)
}
