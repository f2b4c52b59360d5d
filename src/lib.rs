pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod client;

use serde::{Deserialize, Serialize};
use log::error;

pub use client::TaskClassifier;
pub use config::Config;
pub use error::Error;

/*

askllama: hand an email to a self-hosted model behind Open WebUI
and ask whether it contains something the reader has to do.

askllama/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports and result types
│   ├── main.rs         # CLI
│   ├── error.rs        # Error type
│   ├── config.rs       # Environment-backed endpoint config
│   ├── client.rs       # TaskClassifier
│   ├── request.rs      # Request body and task schema
│   └── providers/
│       ├── mod.rs
│       └── open_webui.rs   # HTTP sender and reply envelope
└── tests/

*/

// ===== Result Types =====

/// What the model answered for one email.
/// Subject and description only mean something when `result`
/// is true; use [`ClassificationResult::task`] to read them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClassificationResult
{   /// True if the email contains a task
    pub result: bool
  , #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_subject: Option<String>
  , #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_description: Option<String>
}

/// An actionable task pulled out of an email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task
{   pub subject: String
  , pub description: String
}

impl ClassificationResult
{   /// Parse the model's message content
    pub fn from_content(
      content: &str
    ) -> Result<Self, crate::error::Error>
    {   serde_json::from_str(strip_code_fences(content))
          .map_err(|e| {
            error!("Reply does not match schema: {}", e);
            crate::error::Error::SchemaViolation(e.to_string())
          })
    }

    pub fn is_task(&self) -> bool
    {   self.result
    }

    pub fn task(&self) -> Option<Task>
    {   if !self.result
        {   return None;
        }
        Some(Task
        {   subject: self.task_subject.clone().unwrap_or_default()
          , description: self.task_description.clone()
              .unwrap_or_default()
        })
    }
}

/// Local models like to wrap JSON in markdown fences.
fn strip_code_fences(s: &str) -> &str
{   let trimmed = s.trim();

    if let Some(rest) = trimmed.strip_prefix("```json")
    {   if let Some(json) = rest.strip_suffix("```")
        {   return json.trim();
        }
    }
    if let Some(rest) = trimmed.strip_prefix("```")
    {   if let Some(json) = rest.strip_suffix("```")
        {   return json.trim();
        }
    }

    trimmed
}
