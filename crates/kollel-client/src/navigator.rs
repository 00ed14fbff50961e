//! Client-side navigation collaborator

use std::fmt::Debug;

use async_trait::async_trait;

/// View the user is sent to when the server invalidates the session.
pub const LOGIN_PATH: &str = "/login";

/// Redirect side effect.
///
/// Fired and forgotten; the client does not inspect any result of the
/// navigation.
#[async_trait]
pub trait Navigator: Debug {
    /// Send the user to `path`
    async fn redirect_to(&self, path: &str);
}

/// [`Navigator`] that drops redirects, for headless callers.
#[derive(Debug, Default)]
pub struct NoopNavigator;

#[async_trait]
impl Navigator for NoopNavigator {
    async fn redirect_to(&self, _path: &str) {}
}
