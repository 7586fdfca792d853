//! Shared test support: a scripted runtime replaying canned chunk scripts.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use concierge::error::{ConciergeError, Result};
use concierge::runtime::{AgentRuntime, ChunkStream, RunInput, SessionConfig};
use concierge::types::ResumeCommand;

/// One replayable chunk sequence.
pub type Script = Vec<Result<serde_json::Value>>;

/// Wrap plain chunks into an all-success script.
pub fn ok_script(chunks: Vec<serde_json::Value>) -> Script {
    chunks.into_iter().map(Ok).collect()
}

/// Runtime double that pops one script per `start`/`resume` call and
/// records everything it was asked to do.
#[derive(Default)]
pub struct ScriptedRuntime {
    scripts: Mutex<VecDeque<Script>>,
    pub inputs: Mutex<Vec<RunInput>>,
    pub resume_commands: Mutex<Vec<ResumeCommand>>,
    fail_start: bool,
}

impl ScriptedRuntime {
    pub fn new(start: Script) -> Self {
        let mut scripts = VecDeque::new();
        scripts.push_back(start);
        Self {
            scripts: Mutex::new(scripts),
            ..Self::default()
        }
    }

    /// Queue a script for the next resume call.
    pub fn with_resume_script(self, script: Script) -> Self {
        self.scripts.lock().unwrap().push_back(script);
        self
    }

    /// A runtime whose `start` fails outright.
    pub fn failing() -> Self {
        Self {
            fail_start: true,
            ..Self::default()
        }
    }

    fn next_stream(&self) -> ChunkStream {
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        Box::pin(tokio_stream::iter(script))
    }
}

#[async_trait]
impl AgentRuntime for ScriptedRuntime {
    async fn start(&self, input: RunInput, _session: &SessionConfig) -> Result<ChunkStream> {
        if self.fail_start {
            return Err(ConciergeError::Runtime("provider unavailable".to_string()));
        }
        self.inputs.lock().unwrap().push(input);
        Ok(self.next_stream())
    }

    async fn resume(&self, command: ResumeCommand, _session: &SessionConfig) -> Result<ChunkStream> {
        self.resume_commands.lock().unwrap().push(command);
        Ok(self.next_stream())
    }
}
