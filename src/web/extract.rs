//! Extraction boundary trait for web integration.
//!
//! Defines what the strategy needs to read from a framework-specific request.

use serde_json::Value;

/// Read-only view of the request parts an API key can come from.
///
/// Framework integrations implement this for their own request type (or
/// build a [`RequestAdapter`](super::RequestAdapter)). The strategy never
/// mutates the request.
///
/// # Examples
///
/// ```
/// use localapikey::web::ExtractCredentials;
/// use serde_json::Value;
///
/// struct MyFrameworkRequest {
///     cookie: Option<String>,
///     form: Value,
/// }
///
/// impl ExtractCredentials for MyFrameworkRequest {
///     fn cookie_header(&self) -> Option<&str> {
///         self.cookie.as_deref()
///     }
///
///     fn body(&self) -> Option<&Value> {
///         Some(&self.form)
///     }
///
///     fn query(&self) -> Option<&Value> {
///         None
///     }
/// }
/// ```
pub trait ExtractCredentials {
    /// Raw, unparsed `Cookie` header, if the request carried one.
    fn cookie_header(&self) -> Option<&str>;

    /// Parsed request body (form or JSON), if any.
    fn body(&self) -> Option<&Value>;

    /// Parsed query parameters, if any.
    fn query(&self) -> Option<&Value>;

    /// Identifier used to correlate trace events for this request.
    fn request_id(&self) -> Option<&str> {
        None
    }
}

impl<T: ExtractCredentials + ?Sized> ExtractCredentials for &T {
    fn cookie_header(&self) -> Option<&str> {
        (**self).cookie_header()
    }

    fn body(&self) -> Option<&Value> {
        (**self).body()
    }

    fn query(&self) -> Option<&Value> {
        (**self).query()
    }

    fn request_id(&self) -> Option<&str> {
        (**self).request_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct TestRequest {
        body: Value,
    }

    impl ExtractCredentials for TestRequest {
        fn cookie_header(&self) -> Option<&str> {
            Some("apikey=abc")
        }

        fn body(&self) -> Option<&Value> {
            Some(&self.body)
        }

        fn query(&self) -> Option<&Value> {
            None
        }
    }

    #[test]
    fn request_id_defaults_to_none() {
        let req = TestRequest { body: json!({}) };
        assert!(req.request_id().is_none());
    }

    #[test]
    fn reference_forwards_to_inner() {
        let req = TestRequest {
            body: json!({"apikey": "k"}),
        };
        let by_ref = &req;

        assert_eq!(by_ref.cookie_header(), Some("apikey=abc"));
        assert_eq!(by_ref.body(), Some(&json!({"apikey": "k"})));
        assert!(by_ref.query().is_none());
    }
}
