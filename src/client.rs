use log::debug;

use crate::providers::open_webui::{self, OpenWebUiClient};
use crate::request::{ClassificationRequest, TaskSchema};

/// Asks the configured model whether an email describes a task
#[derive(Debug, Clone)]
pub struct TaskClassifier
{   config: crate::config::Config
  , schema: TaskSchema
  , client: OpenWebUiClient
}

impl TaskClassifier
{   pub fn new(
      config: crate::config::Config
    ) -> Result<Self, crate::error::Error>
    {   debug!("Creating TaskClassifier with model: {}", config.model);
        let client = OpenWebUiClient::new(&config)?;
        Ok(TaskClassifier
        {   config
          , schema: TaskSchema::default()
          , client
        })
    }

    pub fn config(&self) -> &crate::config::Config
    {   &self.config
    }

    pub fn request_for(&self, email_content: &str) -> ClassificationRequest
    {   ClassificationRequest::for_email(
          &self.config.model
        , &self.schema
        , email_content
        )
    }

    /// Send one classification request and hand back the raw
    /// response, whatever its status.
    pub async fn classify(
      &self
    , email_content: &str
    ) -> Result<reqwest::Response, crate::error::Error>
    {   debug!("classify: {} bytes of email", email_content.len());
        let request = self.request_for(email_content);
        self.client.send(&request).await
    }

    /// Message content of the model's reply
    pub async fn reply_content(
      &self
    , email_content: &str
    ) -> Result<String, crate::error::Error>
    {   let response = self.classify(email_content).await?;
        open_webui::parse_reply(response).await
    }

    /// Fully parsed classification
    pub async fn classify_result(
      &self
    , email_content: &str
    ) -> Result<crate::ClassificationResult, crate::error::Error>
    {   let content = self.reply_content(email_content).await?;
        crate::ClassificationResult::from_content(&content)
    }
}
