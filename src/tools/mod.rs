//! Tool system: trait, schema builder, validation, travel-domain stubs.

pub mod tool;
pub mod travel;
pub mod types;
pub mod validation;

pub use tool::{FnTool, Tool, ToolContext, ToolReply};
pub use types::ToolParameters;
