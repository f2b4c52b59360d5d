//! Configuration for the LLM chat endpoint

use std::fmt;
use std::time::Duration;
use log::{debug, error};

/// Host[:port] of the Open WebUI service
pub const ADDRESS_VAR: &str = "LOCAL_LLM_BASE_ADDRESS";

/// Bearer token for the Open WebUI service
pub const TOKEN_VAR: &str = "OPEN_WEBUI_JWT";

pub const DEFAULT_MODEL: &str = "llama3.2:latest";

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Resolved endpoint settings, read-only once loaded
#[derive(Clone, PartialEq, Eq)]
pub struct Config
{   /// Fully derived chat completions URL
    pub api_url: String
  , /// Model name sent with every request
    pub model: String
  , /// Bearer token
    pub token: String
  , /// Whole-request timeout
    pub timeout: Duration
}

impl Config
{   /// Load from the process environment, failing on the
    /// first missing variable
    pub fn from_env() -> Result<Self, crate::error::Error>
    {   debug!("Loading config from environment");
        Config::from_values(
          std::env::var(ADDRESS_VAR).ok()
        , std::env::var(TOKEN_VAR).ok()
        )
    }

    /// Build from already-looked-up values
    pub fn from_values(
      address: Option<String>
    , token: Option<String>
    ) -> Result<Self, crate::error::Error>
    {   let address = required(ADDRESS_VAR, address)?;
        let token = required(TOKEN_VAR, token)?;

        let api_url = format!(
          "http://{}/api/chat/completions",
          address.trim_end_matches('/')
        );
        debug!("Resolved api url: {}", api_url);

        Ok(Config
        {   api_url
          , model: DEFAULT_MODEL.to_string()
          , token
          , timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self
    {   self.model = model.into();
        self
    }

    pub fn with_timeout(
      mut self
    , timeout: Duration
    ) -> Result<Self, crate::error::Error>
    {   if timeout.is_zero()
        {   error!("Rejecting zero timeout");
            return Err(crate::error::Error::InvalidConfiguration(
              "timeout must be greater than zero".to_string()
            ));
        }
        self.timeout = timeout;
        Ok(self)
    }
}

// Keep the token out of logs.
impl fmt::Debug for Config
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.debug_struct("Config")
          .field("api_url", &self.api_url)
          .field("model", &self.model)
          .field("token", &"<redacted>")
          .field("timeout", &self.timeout)
          .finish()
    }
}

fn required(
  name: &str
, value: Option<String>
) -> Result<String, crate::error::Error>
{   match value.map(|v| v.trim().to_string())
    {   Some(v) if !v.is_empty() => Ok(v)
      , _ => {
          error!("Missing environment variable: {}", name);
          Err(crate::error::Error::MissingEnvVar(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests
{   use super::*;
    use crate::error::Error;

    fn some(s: &str) -> Option<String>
    {   Some(s.to_string())
    }

    #[test]
    fn derives_api_url_and_defaults()
    {   let config = Config::from_values(
          some("192.168.1.20:3000")
        , some("jwt-abc")
        ).unwrap();
        assert_eq!(
          config.api_url,
          "http://192.168.1.20:3000/api/chat/completions"
        );
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.token, "jwt-abc");
        assert_eq!(
          config.timeout,
          Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn trailing_slash_is_dropped()
    {   let config = Config::from_values(
          some("localhost:8080/")
        , some("t")
        ).unwrap();
        assert_eq!(
          config.api_url,
          "http://localhost:8080/api/chat/completions"
        );
    }

    #[test]
    fn missing_address_is_reported_first()
    {   let err = Config::from_values(None, None).unwrap_err();
        assert_eq!(err, Error::MissingEnvVar(ADDRESS_VAR.to_string()));
    }

    #[test]
    fn missing_or_blank_token_fails()
    {   let err = Config::from_values(some("host"), None)
          .unwrap_err();
        assert_eq!(err, Error::MissingEnvVar(TOKEN_VAR.to_string()));

        let err = Config::from_values(some("host"), some("  "))
          .unwrap_err();
        assert_eq!(err, Error::MissingEnvVar(TOKEN_VAR.to_string()));
    }

    #[test]
    fn overrides_apply()
    {   let config = Config::from_values(some("h"), some("t"))
          .unwrap()
          .with_model("mistral:7b")
          .with_timeout(Duration::from_secs(5))
          .unwrap();
        assert_eq!(config.model, "mistral:7b");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn zero_timeout_rejected()
    {   let result = Config::from_values(some("h"), some("t"))
          .unwrap()
          .with_timeout(Duration::ZERO);
        assert!(matches!(
          result,
          Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn debug_hides_token()
    {   let config = Config::from_values(some("h"), some("secret"))
          .unwrap();
        let shown = format!("{:?}", config);
        assert!(!shown.contains("secret"));
        assert!(shown.contains("<redacted>"));
    }
}
