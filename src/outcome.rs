//! Authentication outcomes and the host's reporting primitives.

use std::fmt;

use crate::error::BadRequest;

/// Why a request was not authenticated.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure<I> {
    /// The request carried no usable API key
    BadRequest(BadRequest),
    /// The verify callback did not accept the key
    Rejected(Option<I>),
}

impl<I> Failure<I> {
    /// Returns the missing-key failure, if that is what this is.
    pub fn bad_request(&self) -> Option<&BadRequest> {
        match self {
            Failure::BadRequest(err) => Some(err),
            Failure::Rejected(_) => None,
        }
    }

    /// Returns the info the verify callback attached to a rejection.
    pub fn info(&self) -> Option<&I> {
        match self {
            Failure::BadRequest(_) => None,
            Failure::Rejected(info) => info.as_ref(),
        }
    }
}

/// The single result reported for one `authenticate` call.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome<U, I, E> {
    /// The key was accepted
    Success {
        /// The user the verify callback resolved
        user: U,
        /// Additional info from the verify callback
        info: Option<I>,
    },
    /// The request was not authenticated
    Failure(Failure<I>),
    /// The verify callback reported an error
    Error(E),
}

impl<U, I, E> AuthOutcome<U, I, E> {
    /// Returns `true` for [`AuthOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success { .. })
    }

    /// Short label used in trace events.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthOutcome::Success { .. } => "success",
            AuthOutcome::Failure(_) => "failure",
            AuthOutcome::Error(_) => "error",
        }
    }
}

/// Reporting primitives a host framework provides to a strategy.
///
/// Each method consumes the reporter, so a strategy can report at most once
/// per request. Any `FnOnce(AuthOutcome<U, I, E>)` closure is a reporter.
///
/// # Examples
///
/// ```
/// use localapikey::{AuthOutcome, Report};
///
/// let mut seen = None;
/// let reporter = |outcome: AuthOutcome<String, (), ()>| seen = Some(outcome);
/// reporter.success("alice".to_string(), None);
///
/// assert!(seen.unwrap().is_success());
/// ```
pub trait Report<U, I, E> {
    /// Authentication succeeded for `user`.
    fn success(self, user: U, info: Option<I>);

    /// Authentication failed.
    fn fail(self, failure: Failure<I>);

    /// Authentication could not be completed.
    fn error(self, err: E);
}

impl<U, I, E, F> Report<U, I, E> for F
where
    F: FnOnce(AuthOutcome<U, I, E>),
{
    fn success(self, user: U, info: Option<I>) {
        self(AuthOutcome::Success { user, info })
    }

    fn fail(self, failure: Failure<I>) {
        self(AuthOutcome::Failure(failure))
    }

    fn error(self, err: E) {
        self(AuthOutcome::Error(err))
    }
}

/// Type-erased reporter handed to a strategy for one request.
///
/// Wraps whatever the host uses to receive outcomes so strategies can be
/// stored behind `dyn Strategy`. It is `Send`, so the outcome may be reported
/// from another thread.
pub struct Reporter<U, I, E> {
    sink: Box<dyn FnOnce(AuthOutcome<U, I, E>) + Send>,
}

impl<U, I, E> Reporter<U, I, E>
where
    U: 'static,
    I: 'static,
    E: 'static,
{
    /// Wraps a host reporter.
    pub fn new<P>(report: P) -> Self
    where
        P: Report<U, I, E> + Send + 'static,
    {
        Self {
            sink: Box::new(move |outcome: AuthOutcome<U, I, E>| match outcome {
                AuthOutcome::Success { user, info } => report.success(user, info),
                AuthOutcome::Failure(failure) => report.fail(failure),
                AuthOutcome::Error(err) => report.error(err),
            }),
        }
    }
}

impl<U, I, E> Reporter<U, I, E> {
    /// Delivers `outcome` to the host.
    pub fn report(self, outcome: AuthOutcome<U, I, E>) {
        (self.sink)(outcome)
    }
}

impl<U, I, E> Report<U, I, E> for Reporter<U, I, E> {
    fn success(self, user: U, info: Option<I>) {
        self.report(AuthOutcome::Success { user, info })
    }

    fn fail(self, failure: Failure<I>) {
        self.report(AuthOutcome::Failure(failure))
    }

    fn error(self, err: E) {
        self.report(AuthOutcome::Error(err))
    }
}

impl<U, I, E> fmt::Debug for Reporter<U, I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter").finish_non_exhaustive()
    }
}
