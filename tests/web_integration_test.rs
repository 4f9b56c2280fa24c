//! Integration tests for the host-facing surface: custom request types,
//! config loading, and dispatch through the registry.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use localapikey::web::{ExtractCredentials, RequestAdapter};
use localapikey::{
    AuthOutcome, AuthenticateOptions, Authenticator, ConfigError, LocalApiKeyStrategy, Reporter,
    StrategyConfig,
};
use serde_json::{json, Value};

/// A request shaped the way a framework might hand it over.
struct FrameworkRequest {
    headers: Vec<(String, String)>,
    form: Option<Value>,
    params: Option<Value>,
    trace_id: String,
}

impl ExtractCredentials for FrameworkRequest {
    fn cookie_header(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("cookie"))
            .map(|(_, value)| value.as_str())
    }

    fn body(&self) -> Option<&Value> {
        self.form.as_ref()
    }

    fn query(&self) -> Option<&Value> {
        self.params.as_ref()
    }

    fn request_id(&self) -> Option<&str> {
        Some(&self.trace_id)
    }
}

type Outcome = AuthOutcome<String, String, String>;
type Keyed = LocalApiKeyStrategy<RequestAdapter, String, String, String>;

fn collect() -> (Reporter<String, String, String>, mpsc::Receiver<Outcome>) {
    let (tx, rx) = mpsc::channel();
    let reporter = Reporter::new(move |outcome: Outcome| {
        let _ = tx.send(outcome);
    });
    (reporter, rx)
}

#[test]
fn custom_request_type_is_authenticated() {
    let strategy = LocalApiKeyStrategy::<FrameworkRequest, String, String, String>::new(
        |input, done| done.success(format!("owner-of-{}", input.key().expose_secret()), None),
    );

    let req = FrameworkRequest {
        headers: vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("COOKIE".to_string(), "lang=en".to_string()),
        ],
        form: None,
        params: Some(json!({"apikey": "k-42"})),
        trace_id: "trace-1".to_string(),
    };

    let (reporter, rx) = collect();
    strategy.authenticate(&req, &AuthenticateOptions::default(), reporter);

    assert_eq!(
        rx.recv().unwrap(),
        AuthOutcome::Success {
            user: "owner-of-k-42".to_string(),
            info: None,
        }
    );
}

#[test]
fn config_loaded_from_json_drives_extraction() {
    let config: StrategyConfig =
        serde_json::from_value(json!({"apiKeyField": "client[key]", "passReqToCallback": true}))
            .unwrap();

    let strategy = LocalApiKeyStrategy::<RequestAdapter, String, String, String>::builder()
        .config(config)
        .verify(|input, done| {
            let id = input
                .request()
                .map(|req| req.request_id().to_string())
                .unwrap_or_default();
            done.success(id, Some(input.key().expose_secret().clone()))
        })
        .build()
        .unwrap();

    let mut req = RequestAdapter::new("req-cfg".to_string());
    req.add_header("Cookie".to_string(), "session=1".to_string());
    req.add_body_field("client[key]", "nested-key");

    let (reporter, rx) = collect();
    strategy.authenticate(&req, &AuthenticateOptions::default(), reporter);

    assert_eq!(
        rx.recv().unwrap(),
        AuthOutcome::Success {
            user: "req-cfg".to_string(),
            info: Some("nested-key".to_string()),
        }
    );
}

#[test]
fn builder_requires_verify_callback() {
    let result = LocalApiKeyStrategy::<RequestAdapter, String, String, String>::builder()
        .config(StrategyConfig::default())
        .build();

    assert_eq!(result.unwrap_err(), ConfigError::MissingVerify);
}

#[test]
fn registry_dispatches_by_name_with_deferred_completion() {
    let mut auth = Authenticator::<RequestAdapter, String, String, String>::new();
    auth.use_strategy(Keyed::new(|input, done| {
        let key = input.into_key().into_inner();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(5));
            if key == "valid" {
                done.resolve(Ok(Some("alice".to_string())), None);
            } else {
                done.resolve(Ok(None), Some("unknown key".to_string()));
            }
        });
    }));
    auth.use_named(
        "query-only",
        Keyed::builder()
            .api_key_field("token")
            .verify(|_input, done| done.error("verifier disabled".to_string()))
            .build()
            .unwrap(),
    );

    let mut req = RequestAdapter::new("req-reg".to_string());
    req.add_header("Cookie".to_string(), "apikey=valid".to_string());
    req.add_query_param("token", "t");

    let (reporter, rx) = collect();
    auth.authenticate("localapikey", &req, &AuthenticateOptions::default(), reporter)
        .unwrap();
    assert!(rx.recv().unwrap().is_success());

    let (reporter, rx) = collect();
    auth.authenticate("query-only", &req, &AuthenticateOptions::default(), reporter)
        .unwrap();
    assert_eq!(
        rx.recv().unwrap(),
        AuthOutcome::Error("verifier disabled".to_string())
    );

    assert_eq!(
        auth.strategy("query-only").map(|s| s.name()),
        Some("localapikey")
    );
}

#[test]
fn registry_reports_unknown_strategy() {
    let auth = Authenticator::<RequestAdapter, String, String, String>::new();
    let req = RequestAdapter::new("req-none".to_string());
    let (reporter, rx) = collect();

    let err = auth
        .authenticate("localapikey", &req, &AuthenticateOptions::default(), reporter)
        .unwrap_err();

    assert!(err.to_string().contains("localapikey"));
    assert!(rx.recv().is_err(), "dropped reporter sends nothing");
}
