//! Core data types: transcript messages, runtime messages, run updates.

pub mod chat;
pub mod message;
pub mod update;

pub use chat::{ChatMessage, Role};
pub use message::{ContentBlock, MessageContent, RuntimeMessage};
pub use update::{InterruptPrompt, IntermediateStep, ResumeCommand, RunUpdate, StepAction};
