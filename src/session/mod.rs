//! Session driver: wires the runtime seam, the aggregator, and the
//! interrupt/resume bridge into one consumable emission stream.

use std::sync::{Arc, Mutex};

use futures::stream::BoxStream;
use futures::StreamExt;

use crate::aggregate::{Aggregator, Emission, SessionPhase};
use crate::error::Result;
use crate::runtime::{AgentRuntime, ChunkStream, RunInput, SessionConfig};
use crate::types::update::ResumeCommand;

/// Generic message substituted by consumers when a stream errors out.
pub const ERROR_FALLBACK: &str = "Sorry, something went wrong. Please try again.";

/// Emissions ready for incremental rendering.
pub type EmissionStream = BoxStream<'static, Result<Emission>>;

/// What to do when a run pauses on an interrupt.
#[derive(Debug, Clone, PartialEq)]
pub enum ResumePolicy {
    /// End the stream after the prompt emission; the caller resumes later
    /// via [`Session::resume`].
    Manual,
    /// Immediately re-invoke the runtime with this command and splice the
    /// resumed chunks into the same output stream.
    Auto(ResumeCommand),
}

/// One streaming conversation against a runtime thread.
///
/// The session stays `Paused` indefinitely after a manual interrupt until
/// [`Session::resume`] is called; concurrent resumes against the same
/// thread are not guarded.
pub struct Session<R: AgentRuntime + 'static> {
    runtime: Arc<R>,
    config: SessionConfig,
    policy: ResumePolicy,
    phase: Arc<Mutex<SessionPhase>>,
}

impl<R: AgentRuntime + 'static> Session<R> {
    pub fn new(runtime: R, config: SessionConfig) -> Self {
        Self::from_arc(Arc::new(runtime), config)
    }

    /// Build from a shared runtime handle (several sessions, one runtime).
    pub fn from_arc(runtime: Arc<R>, config: SessionConfig) -> Self {
        Self {
            runtime,
            config,
            policy: ResumePolicy::Manual,
            phase: Arc::new(Mutex::new(SessionPhase::Running)),
        }
    }

    pub fn with_resume_policy(mut self, policy: ResumePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current phase of this session.
    pub fn phase(&self) -> SessionPhase {
        *self.phase.lock().expect("session phase lock")
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Start a run and stream its emissions.
    pub async fn stream(&self, input: RunInput) -> Result<EmissionStream> {
        tracing::debug!(thread_id = %self.config.thread_id, "starting run");
        set_phase(&self.phase, SessionPhase::Running);
        let source = self.runtime.start(input, &self.config).await?;
        Ok(self.drive(source))
    }

    /// Continue a paused run with a command and stream its emissions.
    ///
    /// The processed-id set is scoped to each streamed response, so the
    /// resumed stream starts with a fresh one.
    pub async fn resume(&self, command: ResumeCommand) -> Result<EmissionStream> {
        tracing::debug!(thread_id = %self.config.thread_id, "resuming run");
        set_phase(&self.phase, SessionPhase::Running);
        let source = self.runtime.resume(command, &self.config).await?;
        Ok(self.drive(source))
    }

    /// Aggregate a chunk source, applying the resume policy on interrupts.
    fn drive(&self, source: ChunkStream) -> EmissionStream {
        let runtime = Arc::clone(&self.runtime);
        let config = self.config.clone();
        let policy = self.policy.clone();
        let phase = Arc::clone(&self.phase);

        let driven = async_stream::stream! {
            let mut aggregator = Aggregator::new();
            let mut source = source;
            'drive: loop {
                let Some(item) = source.next().await else {
                    break;
                };
                match item {
                    Ok(chunk) => {
                        for emission in aggregator.apply_chunk(&chunk) {
                            let interrupted = emission.is_interrupt();
                            yield Ok(emission);
                            if !interrupted {
                                continue;
                            }
                            set_phase(&phase, SessionPhase::Paused);
                            match &policy {
                                ResumePolicy::Manual => break 'drive,
                                ResumePolicy::Auto(command) => {
                                    tracing::debug!(
                                        thread_id = %config.thread_id,
                                        "auto-resuming interrupted run"
                                    );
                                    match runtime.resume(command.clone(), &config).await {
                                        Ok(resumed) => {
                                            aggregator.resume();
                                            set_phase(&phase, SessionPhase::Running);
                                            source = resumed;
                                            continue 'drive;
                                        }
                                        Err(e) => {
                                            yield Err(e);
                                            break 'drive;
                                        }
                                    }
                                }
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!(thread_id = %config.thread_id, error = %e, "stream error");
                        yield Err(e);
                        break 'drive;
                    }
                }
            }
        };
        Box::pin(driven)
    }
}

fn set_phase(phase: &Arc<Mutex<SessionPhase>>, value: SessionPhase) {
    *phase.lock().expect("session phase lock") = value;
}
