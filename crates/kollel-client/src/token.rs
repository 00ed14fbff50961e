//! Session token and the store that owns it

use std::fmt;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Cookie name the web clients keep the session token under.
pub const SESSION_TOKEN_COOKIE: &str = "kollel_sys_token";

/// Bearer credential for the backend API.
///
/// Opaque to the client; it is read at call time and rendered into an
/// `Authorization` header. An empty token is never attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Create a new [`SessionToken`]
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self(token.into())
    }

    /// Header the token is sent under
    pub fn header_key(&self) -> String {
        "Authorization".to_string()
    }

    /// Whether the token holds no credential
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw token value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bearer {}", self.0)
    }
}

/// Read/write access to the single stored session token.
///
/// The store owns the credential. [`ApiClient`](crate::ApiClient) reads it
/// when a request goes out and clears it when the server invalidates the
/// session; it never writes a new token itself.
#[async_trait]
pub trait TokenStore: fmt::Debug {
    /// Token currently held, if any
    async fn token(&self) -> Option<SessionToken>;

    /// Replace the stored token
    async fn set_token(&self, token: SessionToken);

    /// Remove the stored token
    async fn clear_token(&self);
}

/// In-memory [`TokenStore`]
///
/// The default store, and the stand-in for a cookie jar in tests and
/// headless callers.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<SessionToken>>,
}

impl MemoryTokenStore {
    /// Create a store already holding `token`
    pub fn with_token(token: SessionToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }

    /// Seed a store from a `Cookie` request header, picking out the
    /// [`SESSION_TOKEN_COOKIE`] value when present.
    pub fn from_cookie_header(header: &str) -> Self {
        let token = header.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_TOKEN_COOKIE).then(|| SessionToken::new(value))
        });
        Self {
            token: RwLock::new(token),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn token(&self) -> Option<SessionToken> {
        self.token.read().await.clone()
    }

    async fn set_token(&self, token: SessionToken) {
        *self.token.write().await = Some(token);
    }

    async fn clear_token(&self) {
        *self.token.write().await = None;
    }
}
