//! Concierge — streaming bridge for LLM agent runtimes.
//!
//! Connects an external agent-orchestration runtime (tool-calling agents,
//! supervisors, swarms, human-in-the-loop interrupts) to an incremental
//! consumer. The runtime stays behind the [`runtime::AgentRuntime`] seam;
//! this crate owns the typed update model, the stream classifier that turns
//! heterogeneous runtime chunks into ordered text segments, the
//! interrupt/resume bridge, and the agent/tool configuration glue.
//!
//! # Quick Start
//!
//! ```no_run
//! use concierge::prelude::*;
//! use futures::StreamExt;
//!
//! # async fn example(runtime: impl concierge::runtime::AgentRuntime + 'static) -> concierge::error::Result<()> {
//! let session = Session::new(runtime, SessionConfig::new("thread-1"));
//! let mut stream = session.stream(RunInput::from_user("Book me a hotel in Lisbon")).await?;
//! while let Some(emission) = stream.next().await {
//!     match emission? {
//!         Emission::Text(text) => print!("{text}"),
//!         Emission::ToolOutput { text, .. } => print!("{text}"),
//!         Emission::Interrupt(prompt) => print!("{prompt}"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod aggregate;
pub mod config;
pub mod error;
pub mod prelude;
pub mod runtime;
pub mod session;
pub mod tools;
pub mod types;
