use std::fmt;

/// Custom error type for askllama operations
/// Implements Clone so callers can stash and compare failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Required environment variable is missing or blank
    MissingEnvVar(String)
  , /// Invalid configuration value
    InvalidConfiguration(String)
  , /// Transport failure reaching the LLM service
    Network(String)
  , /// Request timed out
    Timeout
  , /// Service answered with a non-success status
    ApiError
    {   status: u16
      , body: String
    }
  , /// Failed to parse the chat completion envelope
    ParseError(String)
  , /// No choices in API response
    NoChoicesInResponse
  , /// Model reply does not match the task schema
    SchemaViolation(String)
  , /// Reading input failed
    Io(String)
  , /// Generic error
    Other(String)
}

impl Error
{   /// True for failures that happened before any HTTP status came back
    pub fn is_network(&self) -> bool
    {   matches!(self, Error::Network(_) | Error::Timeout)
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingEnvVar(name) => {
              write!(f,
                "Missing environment variable: {}",
                name
              )
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Network(msg) => {
              write!(f, "Network error: {}", msg)
            }
          , Error::Timeout => {
              write!(f, "Request timed out")
            }
          , Error::ApiError { status, body } => {
              write!(f, "API error ({}): {}", status, body)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::NoChoicesInResponse => {
              write!(f, "API response contained no choices")
            }
          , Error::SchemaViolation(msg) => {
              write!(f,
                "Reply does not match task schema: {}",
                msg
              )
            }
          , Error::Io(msg) => {
              write!(f, "I/O error: {}", msg)
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error
{   fn from(e: reqwest::Error) -> Self
    {   if e.is_timeout()
        {   Error::Timeout
        } else
        {   Error::Network(e.to_string())
        }
    }
}

impl From<std::io::Error> for Error
{   fn from(e: std::io::Error) -> Self
    {   Error::Io(e.to_string())
    }
}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}
