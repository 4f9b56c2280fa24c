//! API key authentication strategy for pluggable authentication hosts.
//!
//! A [`LocalApiKeyStrategy`] pulls an API key out of an incoming request and
//! hands it to an application-supplied verify callback:
//! - **Extraction**: the key is looked up under one field name in the
//!   `Cookie` header, then the body, then the query; bracket names such as
//!   `auth[key]` select nested body and query values
//! - **Verification**: the callback completes a [`Done`] handle, now or later
//! - **Reporting**: exactly one [`AuthOutcome`] (success, failure, or error)
//!   reaches the host through its [`Reporter`]
//!
//! # Core Types
//!
//! - [`Strategy`]: the contract a host framework calls into
//! - [`LocalApiKeyStrategy`]: the API key strategy itself
//! - [`StrategyConfig`] / [`AuthenticateOptions`]: construction and per-call settings
//! - [`Authenticator`]: minimal name-keyed registry of strategies
//! - [`Secret<T>`]: wrapper that keeps the extracted key out of logs
//!
//! # Examples
//!
//! ```
//! use localapikey::web::RequestAdapter;
//! use localapikey::{AuthOutcome, AuthenticateOptions, Failure, LocalApiKeyStrategy, Reporter};
//! use std::sync::mpsc;
//!
//! let strategy = LocalApiKeyStrategy::<RequestAdapter, String, String, String>::builder()
//!     .api_key_field("credentials[apikey]")
//!     .verify(|input, done| {
//!         if input.key().expose_secret() == "sk-live-1" {
//!             done.success("alice".to_string(), None)
//!         } else {
//!             done.fail(Some("unknown key".to_string()))
//!         }
//!     })
//!     .build()
//!     .expect("verify callback supplied");
//!
//! let mut req = RequestAdapter::new("req-123".to_string());
//! req.add_header("Cookie".to_string(), "session=abc".to_string());
//! req.add_body_field("credentials[apikey]", "sk-live-2");
//!
//! let (tx, rx) = mpsc::channel();
//! strategy.authenticate(
//!     &req,
//!     &AuthenticateOptions::default(),
//!     Reporter::new(move |outcome: AuthOutcome<String, String, String>| {
//!         let _ = tx.send(outcome);
//!     }),
//! );
//!
//! assert_eq!(
//!     rx.recv().unwrap(),
//!     AuthOutcome::Failure(Failure::Rejected(Some("unknown key".to_string())))
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::print_stdout, clippy::print_stderr)]

mod authenticator;
mod config;
mod error;
pub mod lookup;
mod outcome;
mod secret;
mod strategy;
pub mod web;

pub use authenticator::Authenticator;
pub use config::{AuthenticateOptions, StrategyConfig, DEFAULT_API_KEY_FIELD, STRATEGY_NAME};
pub use error::{BadRequest, ConfigError, Error, DEFAULT_MISSING_KEY_MESSAGE};
pub use outcome::{AuthOutcome, Failure, Report, Reporter};
pub use secret::Secret;
pub use strategy::{Done, LocalApiKeyStrategy, LocalApiKeyStrategyBuilder, Strategy, VerifyInput};
