//! Error types for Concierge.

use thiserror::Error;

/// Primary error type for all Concierge operations.
#[derive(Error, Debug)]
pub enum ConciergeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Tool execution error: {tool_name} — {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl ConciergeError {
    /// Create a tool execution error.
    pub fn tool(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolExecution {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from the external runtime rather than
    /// from local classification or tool plumbing.
    pub fn is_runtime(&self) -> bool {
        matches!(self, Self::Runtime(_) | Self::Stream(_))
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ConciergeError>;
