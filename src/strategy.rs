use std::fmt;
use std::sync::Arc;

use tracing::{debug, debug_span, trace};

use crate::config::{AuthenticateOptions, StrategyConfig, STRATEGY_NAME};
use crate::error::{BadRequest, ConfigError};
use crate::lookup::lookup_key;
use crate::outcome::{Failure, Report, Reporter};
use crate::secret::Secret;
use crate::web::{parse_cookie_header, ExtractCredentials};

/// The plugin contract a host authentication framework expects.
///
/// A strategy inspects one request and reports exactly one outcome through
/// the [`Reporter`] it is given, either before returning or later.
pub trait Strategy<R, U, I, E>: Send + Sync {
    /// Name the strategy is registered under.
    fn name(&self) -> &str;

    /// Authenticates `req`, reporting the result through `reporter`.
    fn authenticate(&self, req: &R, options: &AuthenticateOptions, reporter: Reporter<U, I, E>);
}

/// What the verify callback is called with.
///
/// Carries the request as well as the key when the strategy was configured
/// with `pass_req_to_callback`.
pub enum VerifyInput<'a, R> {
    /// Only the extracted key
    Key(Secret<String>),
    /// The request, then the extracted key
    WithRequest(&'a R, Secret<String>),
}

impl<'a, R> VerifyInput<'a, R> {
    /// The extracted API key.
    pub fn key(&self) -> &Secret<String> {
        match self {
            VerifyInput::Key(key) | VerifyInput::WithRequest(_, key) => key,
        }
    }

    /// The request, when it was passed along.
    pub fn request(&self) -> Option<&'a R> {
        match self {
            VerifyInput::Key(_) => None,
            VerifyInput::WithRequest(req, _) => Some(*req),
        }
    }

    /// Consumes the input and returns the key.
    pub fn into_key(self) -> Secret<String> {
        match self {
            VerifyInput::Key(key) | VerifyInput::WithRequest(_, key) => key,
        }
    }
}

impl<R> fmt::Debug for VerifyInput<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyInput::Key(key) => f.debug_tuple("Key").field(key).finish(),
            VerifyInput::WithRequest(_, key) => {
                f.debug_tuple("WithRequest").field(&"..").field(key).finish()
            }
        }
    }
}

/// Completion handle given to the verify callback.
///
/// Consumed by whichever method completes it, so a callback finishes each
/// request once. It is `Send` and may be completed from another thread after
/// the callback returns.
pub struct Done<U, I, E> {
    reporter: Reporter<U, I, E>,
}

impl<U, I, E> Done<U, I, E> {
    fn new(reporter: Reporter<U, I, E>) -> Self {
        Self { reporter }
    }

    /// Completes with the verify routine's raw result.
    ///
    /// - `Err(err)` reports an error
    /// - `Ok(None)` reports a failure carrying `info`
    /// - `Ok(Some(user))` reports success with `user` and `info`
    pub fn resolve(self, result: Result<Option<U>, E>, info: Option<I>) {
        match result {
            Err(err) => self.error(err),
            Ok(None) => self.fail(info),
            Ok(Some(user)) => self.success(user, info),
        }
    }

    /// The key belongs to `user`.
    pub fn success(self, user: U, info: Option<I>) {
        trace!("verify callback accepted key");
        self.reporter.success(user, info);
    }

    /// The key was not accepted.
    pub fn fail(self, info: Option<I>) {
        trace!("verify callback rejected key");
        self.reporter.fail(Failure::Rejected(info));
    }

    /// Verification itself failed.
    pub fn error(self, err: E) {
        trace!("verify callback reported an error");
        self.reporter.error(err);
    }
}

impl<U, I, E> fmt::Debug for Done<U, I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Done").finish_non_exhaustive()
    }
}

type VerifyFn<R, U, I, E> = Arc<dyn Fn(VerifyInput<'_, R>, Done<U, I, E>) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeySource {
    Cookie,
    Body,
    Query,
}

impl KeySource {
    fn as_str(self) -> &'static str {
        match self {
            KeySource::Cookie => "cookie",
            KeySource::Body => "body",
            KeySource::Query => "query",
        }
    }
}

/// Authenticates requests by an API key found in a cookie, the body, or the
/// query string.
///
/// The key is looked up under one field name in all three places, in that
/// order, and handed to an application-supplied verify callback. The
/// callback completes a [`Done`] handle, which the strategy turns into the
/// host's success, failure, or error report.
///
/// A request without any `Cookie` header fails with a missing-key
/// [`BadRequest`] before the body or query are consulted.
///
/// # Examples
///
/// ```
/// use localapikey::web::RequestAdapter;
/// use localapikey::{AuthOutcome, AuthenticateOptions, LocalApiKeyStrategy, Reporter};
/// use std::sync::mpsc;
///
/// let strategy = LocalApiKeyStrategy::<RequestAdapter, String, String, String>::new(
///     |input, done| {
///         let user = (input.key().expose_secret() == "XYZ").then(|| "alice".to_string());
///         done.resolve(Ok(user), None);
///     },
/// );
///
/// let mut req = RequestAdapter::new("req-1".to_string());
/// req.add_header("Cookie".to_string(), "apikey=XYZ; other=1".to_string());
///
/// let (tx, rx) = mpsc::channel();
/// strategy.authenticate(
///     &req,
///     &AuthenticateOptions::default(),
///     Reporter::new(move |outcome: AuthOutcome<String, String, String>| {
///         let _ = tx.send(outcome);
///     }),
/// );
///
/// assert_eq!(
///     rx.recv().unwrap(),
///     AuthOutcome::Success { user: "alice".to_string(), info: None }
/// );
/// ```
pub struct LocalApiKeyStrategy<R, U, I, E> {
    config: StrategyConfig,
    verify: VerifyFn<R, U, I, E>,
}

impl<R, U, I, E> Clone for LocalApiKeyStrategy<R, U, I, E> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            verify: Arc::clone(&self.verify),
        }
    }
}

impl<R, U, I, E> fmt::Debug for LocalApiKeyStrategy<R, U, I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalApiKeyStrategy")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<R, U, I, E> LocalApiKeyStrategy<R, U, I, E>
where
    R: ExtractCredentials,
{
    /// Creates a strategy with the default configuration.
    pub fn new<F>(verify: F) -> Self
    where
        F: Fn(VerifyInput<'_, R>, Done<U, I, E>) + Send + Sync + 'static,
    {
        Self {
            config: StrategyConfig::default(),
            verify: Arc::new(verify),
        }
    }

    /// Starts building a strategy with custom configuration.
    pub fn builder() -> LocalApiKeyStrategyBuilder<R, U, I, E> {
        LocalApiKeyStrategyBuilder {
            config: StrategyConfig::default(),
            verify: None,
        }
    }

    /// The configuration this strategy was built with.
    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Extracts the API key from `req` without invoking the verify callback.
    ///
    /// Returns `None` when the request has no cookie header or no source
    /// holds a non-empty value for the configured field.
    pub fn extract_key(&self, req: &R) -> Option<Secret<String>> {
        let header = cookie_header(req)?;
        self.locate_key(header, req).map(|(_, key)| key)
    }

    /// Authenticates `req` and reports the outcome through `reporter`.
    pub fn authenticate(&self, req: &R, options: &AuthenticateOptions, reporter: Reporter<U, I, E>) {
        let span = debug_span!(
            "authenticate",
            strategy = STRATEGY_NAME,
            request_id = req.request_id().unwrap_or("-")
        );
        let _enter = span.enter();

        let Some(header) = cookie_header(req) else {
            debug!("request has no cookie header");
            reporter.fail(Failure::BadRequest(BadRequest::missing_key(
                options.bad_request_message(),
            )));
            return;
        };

        let Some((source, key)) = self.locate_key(header, req) else {
            debug!(field = self.config.api_key_field(), "no api key in cookie, body or query");
            reporter.fail(Failure::BadRequest(BadRequest::missing_key(
                options.bad_request_message(),
            )));
            return;
        };

        debug!(
            source = source.as_str(),
            key = %key,
            pass_request = self.config.pass_req_to_callback(),
            "invoking verify callback"
        );

        let input = if self.config.pass_req_to_callback() {
            VerifyInput::WithRequest(req, key)
        } else {
            VerifyInput::Key(key)
        };
        (self.verify)(input, Done::new(reporter));
    }

    fn locate_key(&self, header: &str, req: &R) -> Option<(KeySource, Secret<String>)> {
        let field = self.config.api_key_field();
        let cookies = parse_cookie_header(header);

        let (source, key) = cookies
            .get(field)
            .filter(|value| !value.is_empty())
            .map(|value| (KeySource::Cookie, value.clone()))
            .or_else(|| lookup_key(req.body(), field).map(|key| (KeySource::Body, key)))
            .or_else(|| lookup_key(req.query(), field).map(|key| (KeySource::Query, key)))?;

        trace!(source = source.as_str(), "api key located");
        Some((source, Secret::new(key)))
    }
}

/// An empty header counts as no header.
fn cookie_header<R: ExtractCredentials>(req: &R) -> Option<&str> {
    req.cookie_header().filter(|header| !header.is_empty())
}

impl<R, U, I, E> Strategy<R, U, I, E> for LocalApiKeyStrategy<R, U, I, E>
where
    R: ExtractCredentials,
{
    fn name(&self) -> &str {
        STRATEGY_NAME
    }

    fn authenticate(&self, req: &R, options: &AuthenticateOptions, reporter: Reporter<U, I, E>) {
        LocalApiKeyStrategy::authenticate(self, req, options, reporter)
    }
}

/// Builder for [`LocalApiKeyStrategy`].
///
/// # Examples
///
/// ```
/// use localapikey::web::RequestAdapter;
/// use localapikey::{ConfigError, LocalApiKeyStrategy};
///
/// let missing = LocalApiKeyStrategy::<RequestAdapter, String, (), ()>::builder()
///     .api_key_field("token")
///     .build();
/// assert_eq!(missing.unwrap_err(), ConfigError::MissingVerify);
///
/// let strategy = LocalApiKeyStrategy::<RequestAdapter, String, (), ()>::builder()
///     .api_key_field("token")
///     .pass_req_to_callback(true)
///     .verify(|_input, done| done.fail(None))
///     .build()
///     .unwrap();
/// assert_eq!(strategy.config().api_key_field(), "token");
/// ```
pub struct LocalApiKeyStrategyBuilder<R, U, I, E> {
    config: StrategyConfig,
    verify: Option<VerifyFn<R, U, I, E>>,
}

impl<R, U, I, E> LocalApiKeyStrategyBuilder<R, U, I, E>
where
    R: ExtractCredentials,
{
    /// Replaces the whole configuration, e.g. one loaded from a file.
    pub fn config(mut self, config: StrategyConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the field name searched in cookies, body and query.
    pub fn api_key_field(mut self, field: impl Into<String>) -> Self {
        self.config = self.config.with_api_key_field(field);
        self
    }

    /// Passes the request to the verify callback ahead of the key.
    pub fn pass_req_to_callback(mut self, pass: bool) -> Self {
        self.config = self.config.with_pass_req_to_callback(pass);
        self
    }

    /// Sets the verify callback.
    pub fn verify<F>(mut self, verify: F) -> Self
    where
        F: Fn(VerifyInput<'_, R>, Done<U, I, E>) + Send + Sync + 'static,
    {
        self.verify = Some(Arc::new(verify));
        self
    }

    /// Builds the strategy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVerify`] if no verify callback was set.
    pub fn build(self) -> Result<LocalApiKeyStrategy<R, U, I, E>, ConfigError> {
        let verify = self.verify.ok_or(ConfigError::MissingVerify)?;
        Ok(LocalApiKeyStrategy {
            config: self.config,
            verify,
        })
    }
}

impl<R, U, I, E> fmt::Debug for LocalApiKeyStrategyBuilder<R, U, I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalApiKeyStrategyBuilder")
            .field("config", &self.config)
            .field("has_verify", &self.verify.is_some())
            .finish()
    }
}
