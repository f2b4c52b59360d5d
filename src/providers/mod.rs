//! LLM endpoint implementations

pub mod open_webui;

// Re-export for convenience
pub use open_webui::{parse_reply, OpenWebUiClient};
