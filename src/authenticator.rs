use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::AuthenticateOptions;
use crate::error::Error;
use crate::outcome::Reporter;
use crate::strategy::Strategy;

/// Name-keyed registry of strategies, the minimal host side of the contract.
///
/// Strategies register under their own [`Strategy::name`] (or an explicit
/// alias) and requests are dispatched by name.
///
/// # Examples
///
/// ```
/// use localapikey::web::RequestAdapter;
/// use localapikey::{AuthOutcome, AuthenticateOptions, Authenticator, LocalApiKeyStrategy, Reporter};
///
/// let mut auth = Authenticator::<RequestAdapter, String, (), ()>::new();
/// auth.use_strategy(LocalApiKeyStrategy::<RequestAdapter, String, (), ()>::new(|input, done| {
///     done.success(input.into_key().into_inner(), None)
/// }));
///
/// let mut req = RequestAdapter::new("req-1".to_string());
/// req.add_header("cookie".to_string(), "apikey=k1".to_string());
///
/// auth.authenticate(
///     "localapikey",
///     &req,
///     &AuthenticateOptions::default(),
///     Reporter::new(|outcome: AuthOutcome<String, (), ()>| assert!(outcome.is_success())),
/// )
/// .expect("strategy registered");
///
/// assert!(auth.authenticate(
///     "oauth",
///     &req,
///     &AuthenticateOptions::default(),
///     Reporter::new(|_: AuthOutcome<String, (), ()>| {}),
/// )
/// .is_err());
/// ```
pub struct Authenticator<R, U, I, E> {
    strategies: HashMap<String, Arc<dyn Strategy<R, U, I, E>>>,
}

impl<R, U, I, E> Default for Authenticator<R, U, I, E> {
    fn default() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }
}

impl<R, U, I, E> Authenticator<R, U, I, E> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `strategy` under its own name, replacing any previous one.
    pub fn use_strategy<S>(&mut self, strategy: S) -> &mut Self
    where
        S: Strategy<R, U, I, E> + 'static,
    {
        let name = strategy.name().to_string();
        self.use_named(name, strategy)
    }

    /// Registers `strategy` under an explicit name.
    pub fn use_named<S>(&mut self, name: impl Into<String>, strategy: S) -> &mut Self
    where
        S: Strategy<R, U, I, E> + 'static,
    {
        let name = name.into();
        debug!(strategy = %name, "registering strategy");
        if self.strategies.insert(name.clone(), Arc::new(strategy)).is_some() {
            warn!(strategy = %name, "replaced previously registered strategy");
        }
        self
    }

    /// Removes the strategy registered under `name`.
    ///
    /// Returns `true` if one was registered.
    pub fn unuse(&mut self, name: &str) -> bool {
        self.strategies.remove(name).is_some()
    }

    /// Looks up the strategy registered under `name`.
    pub fn strategy(&self, name: &str) -> Option<&dyn Strategy<R, U, I, E>> {
        self.strategies.get(name).map(|s| s.as_ref())
    }

    /// Dispatches `req` to the strategy registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownStrategy`] if nothing is registered under
    /// `name`. The reporter is dropped unused in that case.
    pub fn authenticate(
        &self,
        name: &str,
        req: &R,
        options: &AuthenticateOptions,
        reporter: Reporter<U, I, E>,
    ) -> Result<(), Error> {
        let strategy = self
            .strategies
            .get(name)
            .ok_or_else(|| Error::UnknownStrategy(name.to_string()))?;
        strategy.authenticate(req, options, reporter);
        Ok(())
    }
}

impl<R, U, I, E> fmt::Debug for Authenticator<R, U, I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Authenticator")
            .field("strategies", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::AuthOutcome;
    use crate::strategy::LocalApiKeyStrategy;
    use crate::web::RequestAdapter;
    use std::sync::mpsc;

    type TestAuthenticator = Authenticator<RequestAdapter, String, (), String>;
    type Outcome = AuthOutcome<String, (), String>;

    fn rejecting() -> LocalApiKeyStrategy<RequestAdapter, String, (), String> {
        LocalApiKeyStrategy::new(|_input, done| done.fail(None))
    }

    #[test]
    fn registers_under_strategy_name() {
        let mut auth = TestAuthenticator::new();
        auth.use_strategy(rejecting());

        assert!(auth.strategy("localapikey").is_some());
        assert_eq!(format!("{:?}", auth), r#"Authenticator { strategies: ["localapikey"] }"#);
    }

    #[test]
    fn registers_under_alias() {
        let mut auth = TestAuthenticator::new();
        auth.use_named("admin-key", rejecting());

        assert!(auth.strategy("localapikey").is_none());
        assert_eq!(auth.strategy("admin-key").map(|s| s.name()), Some("localapikey"));
    }

    #[test]
    fn unuse_removes_strategy() {
        let mut auth = TestAuthenticator::new();
        auth.use_strategy(rejecting());

        assert!(auth.unuse("localapikey"));
        assert!(!auth.unuse("localapikey"));
        assert!(auth.strategy("localapikey").is_none());
    }

    #[test]
    fn dispatches_to_registered_strategy() {
        let mut auth = TestAuthenticator::new();
        auth.use_strategy(rejecting());

        let mut req = RequestAdapter::new("req-1".to_string());
        req.add_header("Cookie".to_string(), "apikey=abc".to_string());

        let (tx, rx) = mpsc::channel();
        auth.authenticate(
            "localapikey",
            &req,
            &AuthenticateOptions::default(),
            Reporter::new(move |outcome: Outcome| {
                let _ = tx.send(outcome);
            }),
        )
        .unwrap();

        assert_eq!(rx.recv().unwrap().kind(), "failure");
    }

    #[test]
    fn unknown_strategy_is_an_error() {
        let auth = TestAuthenticator::new();
        let req = RequestAdapter::new("req-1".to_string());

        let err = auth
            .authenticate(
                "localapikey",
                &req,
                &AuthenticateOptions::default(),
                Reporter::new(|_: Outcome| {}),
            )
            .unwrap_err();

        assert!(matches!(err, Error::UnknownStrategy(name) if name == "localapikey"));
    }
}
