//! Kollel System API client

use std::str::FromStr;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::base_url::{self, ApiUrl};
use crate::error::Error;
use crate::navigator::{Navigator, NoopNavigator, LOGIN_PATH};
use crate::options::RequestOptions;
use crate::response::{ApiOutcome, ErrorResponse, FailureBody};
use crate::token::{MemoryTokenStore, TokenStore};

/// Environment variable the base URL is read from when not set explicitly.
pub const API_URL_ENV: &str = "API_URL";

#[derive(Debug, Clone)]
struct ClientCore {
    inner: Client,
}

impl ClientCore {
    fn new() -> Self {
        Self {
            inner: Client::new(),
        }
    }
}

/// Client for the Kollel System backend API.
///
/// One instance wires together a base URL, a token store and a navigator.
/// Calls are independent of each other: each one reads the session token at
/// its own call time, so clearing the token during one in-flight call does
/// not affect another already on the wire.
#[derive(Debug, Clone)]
pub struct ApiClient {
    core: ClientCore,
    base_url: ApiUrl,
    token_store: Arc<dyn TokenStore + Send + Sync>,
    navigator: Arc<dyn Navigator + Send + Sync>,
}

impl ApiClient {
    /// Create an [`ApiClientBuilder`]
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// Store the client reads the session token from
    pub fn token_store(&self) -> &Arc<dyn TokenStore + Send + Sync> {
        &self.token_store
    }

    /// Issue one request against the configured base URL.
    ///
    /// `url` is a path joined onto the base URL, or an absolute `http(s)`
    /// URL used as-is. The call never returns an error: every failure
    /// resolves into one of the [`ApiOutcome`] arms, and a `reLogin` signal
    /// from the server clears the stored token and redirects to the login
    /// view instead of surfacing data.
    #[instrument(skip(self, options), fields(base_url = %self.base_url))]
    pub async fn request(&self, url: &str, options: RequestOptions) -> ApiOutcome {
        let target = match self.resolve_target(url) {
            Ok(target) => target,
            Err(err) => {
                tracing::warn!("Unusable request target {}: {}", url, err);
                return ApiOutcome::Failure(FailureBody::new(None, None));
            }
        };

        let method = options.method.clone().unwrap_or(Method::GET);
        let mut request = self
            .core
            .inner
            .request(method, target)
            .headers(self.compose_headers(&options).await);

        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!("Request failed before a response: {}", err);
                return ApiOutcome::Failure(FailureBody::new(
                    None,
                    err.status().map(|status| status.as_u16()),
                ));
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!("Failed reading response body: {}", err);
                return ApiOutcome::Failure(FailureBody::new(None, Some(status.as_u16())));
            }
        };

        if status.is_success() {
            return ApiOutcome::Body(parse_body(&text));
        }

        let error_response = ErrorResponse::from_body(status.as_u16(), &text);
        if error_response.re_login() {
            tracing::info!("Session invalidated by server, clearing token");
            self.token_store.clear_token().await;
            self.navigator.redirect_to(LOGIN_PATH).await;
            return ApiOutcome::SessionInvalidated;
        }

        ApiOutcome::ErrorResponse(error_response)
    }

    /// GET a path
    pub async fn get(&self, path: &str) -> ApiOutcome {
        self.request(path, RequestOptions::new()).await
    }

    /// POST `body` as JSON to a path
    pub async fn post(&self, path: &str, body: Value) -> ApiOutcome {
        self.request(path, RequestOptions::new().method(Method::POST).json(body))
            .await
    }

    /// PUT `body` as JSON to a path
    pub async fn put(&self, path: &str, body: Value) -> ApiOutcome {
        self.request(path, RequestOptions::new().method(Method::PUT).json(body))
            .await
    }

    /// DELETE a path
    pub async fn delete(&self, path: &str) -> ApiOutcome {
        self.request(path, RequestOptions::new().method(Method::DELETE))
            .await
    }

    fn resolve_target(&self, url: &str) -> Result<Url, base_url::Error> {
        if url.starts_with("http://") || url.starts_with("https://") {
            Ok(Url::parse(url)?)
        } else {
            self.base_url.join(url)
        }
    }

    /// Default JSON headers plus the bearer token when one is held, with the
    /// caller's headers merged on top, last write wins.
    async fn compose_headers(&self, options: &RequestOptions) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = self
            .token_store
            .token()
            .await
            .filter(|token| !token.is_empty())
        {
            match (
                HeaderName::from_bytes(token.header_key().as_bytes()),
                HeaderValue::from_str(&token.to_string()),
            ) {
                (Ok(key), Ok(value)) => {
                    headers.insert(key, value);
                }
                _ => tracing::warn!("Skipping unusable session token"),
            }
        }

        for (key, value) in &options.headers {
            match (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(key), Ok(value)) => {
                    headers.insert(key, value);
                }
                _ => tracing::warn!("Skipping invalid header {}", key),
            }
        }

        headers
    }
}

fn parse_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Builder for creating a new [`ApiClient`]
#[derive(Debug, Default)]
pub struct ApiClientBuilder {
    base_url: Option<ApiUrl>,
    token_store: Option<Arc<dyn TokenStore + Send + Sync>>,
    navigator: Option<Arc<dyn Navigator + Send + Sync>>,
    client: Option<Client>,
}

impl ApiClientBuilder {
    /// Create a new [`ApiClientBuilder`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    pub fn base_url(mut self, base_url: ApiUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Read the base URL from the [`API_URL_ENV`] environment variable
    pub fn base_url_from_env(mut self) -> Result<Self, Error> {
        let raw = std::env::var(API_URL_ENV).map_err(|_| Error::BaseUrlNotSet)?;
        self.base_url = Some(ApiUrl::from_str(&raw)?);
        Ok(self)
    }

    /// Set the token store
    pub fn token_store(mut self, token_store: Arc<dyn TokenStore + Send + Sync>) -> Self {
        self.token_store = Some(token_store);
        self
    }

    /// Set the navigator
    pub fn navigator(mut self, navigator: Arc<dyn Navigator + Send + Sync>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Use a preconfigured transport client
    pub fn http_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the [`ApiClient`]
    pub fn build(self) -> Result<ApiClient, Error> {
        let base_url = self.base_url.ok_or(Error::BaseUrlNotSet)?;

        Ok(ApiClient {
            core: self
                .client
                .map(|inner| ClientCore { inner })
                .unwrap_or_else(ClientCore::new),
            base_url,
            token_store: self
                .token_store
                .unwrap_or_else(|| Arc::new(MemoryTokenStore::default())),
            navigator: self.navigator.unwrap_or_else(|| Arc::new(NoopNavigator)),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn test_client() -> ApiClient {
        ApiClient::builder()
            .base_url(ApiUrl::from_str("https://api.kollel.example").expect("valid url"))
            .build()
            .expect("buildable client")
    }

    #[test]
    fn test_build_requires_base_url() {
        assert!(matches!(
            ApiClient::builder().build(),
            Err(Error::BaseUrlNotSet)
        ));
    }

    #[test]
    fn test_relative_target_joins_base() {
        let client = test_client();
        let target = client.resolve_target("/items").expect("resolvable");
        assert_eq!(target.to_string(), "https://api.kollel.example/items");
    }

    #[test]
    fn test_absolute_target_bypasses_base() {
        let client = test_client();
        let target = client
            .resolve_target("https://elsewhere.example/status")
            .expect("resolvable");
        assert_eq!(target.to_string(), "https://elsewhere.example/status");
    }

    #[test]
    fn test_parse_body_json() {
        assert_eq!(parse_body(r#"{"items": []}"#), json!({"items": []}));
    }

    #[test]
    fn test_parse_body_text_falls_back_to_string() {
        assert_eq!(parse_body("plain text"), json!("plain text"));
    }

    #[test]
    fn test_parse_body_empty_is_null() {
        assert_eq!(parse_body(""), Value::Null);
    }
}
