//! Strategy configuration and per-call options.

use serde::Deserialize;

/// Name the strategy registers under with the host framework.
pub const STRATEGY_NAME: &str = "localapikey";

/// Field searched in cookies, body and query when none is configured.
pub const DEFAULT_API_KEY_FIELD: &str = "apikey";

fn default_api_key_field() -> String {
    DEFAULT_API_KEY_FIELD.to_string()
}

/// Construction-time settings for [`LocalApiKeyStrategy`](crate::LocalApiKeyStrategy).
///
/// Deserializes from application config using camelCase keys; missing keys
/// take their defaults.
///
/// # Examples
///
/// ```
/// use localapikey::StrategyConfig;
///
/// let config: StrategyConfig =
///     serde_json::from_str(r#"{"apiKeyField": "auth[key]", "passReqToCallback": true}"#).unwrap();
///
/// assert_eq!(config.api_key_field(), "auth[key]");
/// assert!(config.pass_req_to_callback());
///
/// let defaults = StrategyConfig::default();
/// assert_eq!(defaults.api_key_field(), "apikey");
/// assert!(!defaults.pass_req_to_callback());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrategyConfig {
    api_key_field: String,
    pass_req_to_callback: bool,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            api_key_field: default_api_key_field(),
            pass_req_to_callback: false,
        }
    }
}

impl StrategyConfig {
    /// Sets the field name; bracket notation (`a[b][c]`) selects nested
    /// body and query values.
    pub fn with_api_key_field(mut self, field: impl Into<String>) -> Self {
        self.api_key_field = field.into();
        self
    }

    /// Selects whether the verify callback also receives the request.
    pub fn with_pass_req_to_callback(mut self, pass: bool) -> Self {
        self.pass_req_to_callback = pass;
        self
    }

    /// Field name the key is looked up under.
    ///
    /// An empty configured name falls back to [`DEFAULT_API_KEY_FIELD`].
    pub fn api_key_field(&self) -> &str {
        if self.api_key_field.is_empty() {
            DEFAULT_API_KEY_FIELD
        } else {
            &self.api_key_field
        }
    }

    /// Whether the request is passed to the verify callback.
    pub fn pass_req_to_callback(&self) -> bool {
        self.pass_req_to_callback
    }
}

/// Options supplied by the host for a single `authenticate` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthenticateOptions {
    bad_request_message: Option<String>,
}

impl AuthenticateOptions {
    /// Overrides the message reported when no key is found.
    pub fn with_bad_request_message(mut self, message: impl Into<String>) -> Self {
        self.bad_request_message = Some(message.into());
        self
    }

    /// Custom missing-key message, if one was set.
    pub fn bad_request_message(&self) -> Option<&str> {
        self.bad_request_message.as_deref()
    }
}
