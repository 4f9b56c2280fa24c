use thiserror::Error as ThisError;

/// Message used when no API key could be found and the caller did not
/// supply one of their own.
pub const DEFAULT_MISSING_KEY_MESSAGE: &str = "Missing API Key";

/// Errors surfaced by this crate outside of the per-request outcome path.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The strategy could not be constructed
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// No strategy is registered under the requested name
    #[error("unknown authentication strategy '{0}'")]
    UnknownStrategy(String),
}

/// Misconfiguration detected while building a strategy.
///
/// These indicate a programming mistake rather than a bad request, so they
/// are returned from `build()` instead of being reported per request.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ConfigError {
    /// No verify callback was supplied
    #[error("local api key authentication strategy requires a verify function")]
    MissingVerify,
}

/// A request that carried no usable API key.
///
/// Reported through the failure path, never returned as an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{message}")]
pub struct BadRequest {
    message: String,
}

impl BadRequest {
    /// Creates a bad-request failure with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Builds the missing-key failure, preferring `custom` when present.
    pub(crate) fn missing_key(custom: Option<&str>) -> Self {
        Self::new(custom.unwrap_or(DEFAULT_MISSING_KEY_MESSAGE))
    }

    /// Human-readable description of what was missing.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status a host framework should answer with.
    pub fn status(&self) -> u16 {
        400
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_uses_default_message() {
        let err = BadRequest::missing_key(None);
        assert_eq!(err.message(), "Missing API Key");
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn missing_key_prefers_custom_message() {
        let err = BadRequest::missing_key(Some("Key required"));
        assert_eq!(err.to_string(), "Key required");
    }

    #[test]
    fn config_error_wraps_into_crate_error() {
        let err: Error = ConfigError::MissingVerify.into();
        assert!(err.to_string().contains("requires a verify function"));
    }
}
