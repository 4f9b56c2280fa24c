//! Request adapter for handing HTTP requests to the strategy.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::lookup::insert_path;

use super::ExtractCredentials;

/// Owned, framework-agnostic request the strategy can authenticate.
///
/// Framework integrations either implement [`ExtractCredentials`] for their
/// own request type or copy the relevant parts into a `RequestAdapter`.
/// Header names are stored lower-cased, so `Cookie` and `cookie` are the
/// same header.
///
/// # Examples
///
/// ```
/// use localapikey::web::{ExtractCredentials, RequestAdapter};
/// use serde_json::json;
///
/// let mut adapter = RequestAdapter::new("req-12345".to_string());
/// adapter.add_header("Cookie".to_string(), "session=1".to_string());
/// adapter.add_query_param("auth[apikey]", "from-query");
///
/// assert_eq!(adapter.cookie_header(), Some("session=1"));
/// assert_eq!(adapter.query(), Some(&json!({"auth": {"apikey": "from-query"}})));
/// ```
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    /// Unique request identifier, used for tracing
    request_id: String,
    /// Request headers keyed by lower-cased name
    headers: HashMap<String, String>,
    /// Parsed body, absent until set
    body: Option<Value>,
    /// Parsed query parameters, absent until the first one is added
    query: Option<Value>,
}

impl RequestAdapter {
    /// Creates an adapter with no headers, body, or query.
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            headers: HashMap::new(),
            body: None,
            query: None,
        }
    }

    /// Adds a header, replacing any previous value under the same name.
    pub fn add_header(&mut self, name: String, value: String) {
        self.headers.insert(name.to_ascii_lowercase(), value);
    }

    /// Replaces the parsed request body.
    pub fn set_body(&mut self, body: Value) {
        self.body = Some(body);
    }

    /// Sets a single body field; bracketed names create nested objects.
    pub fn add_body_field(&mut self, name: &str, value: impl Into<Value>) {
        let body = self.body.get_or_insert_with(|| Value::Object(Map::new()));
        insert_path(body, name, value.into());
    }

    /// Replaces the parsed query parameters.
    pub fn set_query(&mut self, query: Value) {
        self.query = Some(query);
    }

    /// Adds a query parameter.
    ///
    /// A bracketed name such as `user[key]` is stored as nested data,
    /// the way query-string parsers in web frameworks expand it.
    pub fn add_query_param(&mut self, name: &str, value: impl Into<Value>) {
        let query = self.query.get_or_insert_with(|| Value::Object(Map::new()));
        insert_path(query, name, value.into());
    }

    /// Returns the header value for `name`, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns a reference to the request ID.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl ExtractCredentials for RequestAdapter {
    fn cookie_header(&self) -> Option<&str> {
        self.header("cookie")
    }

    fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    fn query(&self) -> Option<&Value> {
        self.query.as_ref()
    }

    fn request_id(&self) -> Option<&str> {
        Some(&self.request_id)
    }
}
