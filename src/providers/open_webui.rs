use serde::Deserialize;
use log::{debug, trace, error};

use crate::request::{ChatMessage, ClassificationRequest};

// ===== Response Types =====

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse
{   pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   pub message: ChatMessage
  , #[serde(default)]
    pub finish_reason: Option<String>
}

// ===== Open WebUI Client =====

/// Sends chat completion requests to an Open WebUI instance
#[derive(Clone)]
pub struct OpenWebUiClient
{   api_url: String
  , token: String
  , http_client: reqwest::Client
}

impl OpenWebUiClient
{   pub fn new(
      config: &crate::config::Config
    ) -> Result<Self, crate::error::Error>
    {   debug!(
          "Creating OpenWebUiClient for {} (timeout {:?})",
          config.api_url, config.timeout
        );
        let http_client = reqwest::Client::builder()
          .timeout(config.timeout)
          .build()
          .map_err(|e| {
            error!("Failed to build HTTP client: {}", e);
            crate::error::Error::InvalidConfiguration(e.to_string())
          })?;

        Ok(OpenWebUiClient
        {   api_url: config.api_url.clone()
          , token: config.token.clone()
          , http_client
        })
    }

    pub fn api_url(&self) -> &str
    {   &self.api_url
    }

    /// Post one request. Any HTTP status comes back as a
    /// response; only transport failures are errors.
    pub async fn send(
      &self
    , request: &ClassificationRequest
    ) -> Result<reqwest::Response, crate::error::Error>
    {   debug!("Posting classification to {}", self.api_url);
        trace!("Open WebUI request: {:?}", request);

        let response = self.http_client
          .post(&self.api_url)
          .header("Authorization", format!("Bearer {}", self.token))
          .header("Content-Type", "application/json")
          .json(request)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::error::Error::from(e)
          })?;

        trace!("Open WebUI response status: {}", response.status());
        Ok(response)
    }
}

impl std::fmt::Debug for OpenWebUiClient
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {   f.debug_struct("OpenWebUiClient")
          .field("api_url", &self.api_url)
          .finish_non_exhaustive()
    }
}

/// Pull the first choice's message content out of a raw reply
pub async fn parse_reply(
  response: reqwest::Response
) -> Result<String, crate::error::Error>
{   let status = response.status();

    if !status.is_success()
    {   let body = response.text().await
          .unwrap_or_else(|_|
            "Unknown error".to_string()
          );
        error!("Open WebUI API error {}: {}", status, body);
        return Err(crate::error::Error::ApiError
        {   status: status.as_u16()
          , body
        });
    }

    let body = response.text().await.map_err(|e| {
      error!("Failed to read body: {}", e);
      crate::error::Error::from(e)
    })?;

    content_from_body(&body)
}

/// Same as [`parse_reply`] for an already-read 2xx body
pub fn content_from_body(
  body: &str
) -> Result<String, crate::error::Error>
{   let chat_response: ChatCompletionResponse
      = serde_json::from_str(body).map_err(|e| {
        error!("Parse error: {}", e);
        crate::error::Error::ParseError(e.to_string())
      })?;

    chat_response.choices.into_iter()
      .next()
      .map(|c| c.message.content)
      .ok_or_else(|| {
        error!("No choices in response");
        crate::error::Error::NoChoicesInResponse
      })
}
