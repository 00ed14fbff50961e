//! Per-call request configuration

use reqwest::Method;
use serde_json::Value;

/// Caller-supplied configuration merged into one outgoing request.
///
/// Everything is optional; the defaults are a GET with no query, no body and
/// no extra headers. Nothing here is validated, it is passed through to the
/// transport as given. Headers set here win over the client's defaults on
/// key collision.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub(crate) method: Option<Method>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<Value>,
}

impl RequestOptions {
    /// New empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP method
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Add a header to the request
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Add a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the request body as JSON
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}
