//! Messages as emitted by the external runtime.

use serde::{Deserialize, Serialize};

use super::chat::Role;

/// One typed block inside structured message content.
///
/// Anthropic-style content arrays mix text with tool invocations; only the
/// text blocks are ever surfaced to a consumer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        input: serde_json::Value,
    },
    /// Any block shape this crate does not recognize.
    #[serde(other)]
    Unknown,
}

/// Message content: a plain string or a sequence of typed blocks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl MessageContent {
    /// Non-empty text segments in block order.
    ///
    /// A plain string yields itself; a block sequence yields each `text`
    /// block and suppresses `tool_use` and unknown blocks.
    pub fn text_segments(&self) -> Vec<&str> {
        match self {
            Self::Text(text) => {
                if text.is_empty() {
                    Vec::new()
                } else {
                    vec![text.as_str()]
                }
            }
            Self::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::Text { text } if !text.is_empty() => Some(text.as_str()),
                    _ => None,
                })
                .collect(),
        }
    }

    /// Whether there is any renderable text at all.
    pub fn is_empty(&self) -> bool {
        self.text_segments().is_empty()
    }
}

impl Default for MessageContent {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// A message inside a runtime update channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuntimeMessage {
    /// Opaque identifier assigned by the runtime; used for deduplication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Message kind (`human`, `ai`, `system`, `tool`).
    #[serde(default = "default_kind", rename = "type", alias = "role")]
    pub kind: Role,
    #[serde(default)]
    pub content: MessageContent,
    /// Set on tool messages whose execution failed validation or errored.
    #[serde(default)]
    pub is_error: bool,
}

fn default_kind() -> Role {
    Role::Assistant
}

impl RuntimeMessage {
    /// Construct an assistant message with plain text content.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            id: None,
            kind: Role::Assistant,
            content: MessageContent::Text(text.into()),
            is_error: false,
        }
    }

    /// Construct a tool result message.
    pub fn tool_result(id: impl Into<String>, text: impl Into<String>, is_error: bool) -> Self {
        Self {
            id: Some(id.into()),
            kind: Role::Tool,
            content: MessageContent::Text(text.into()),
            is_error,
        }
    }
}
