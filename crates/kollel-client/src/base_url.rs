//! Base url

use core::fmt;
use core::str::FromStr;

use thiserror::Error;
use url::{ParseError, Url};

/// Url Error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Url error
    #[error(transparent)]
    Url(#[from] ParseError),
    /// Invalid URL structure
    #[error("Invalid URL")]
    InvalidUrl,
}

/// Base URL of the backend API
///
/// Stored in a normalized form so that two spellings of the same endpoint
/// compare equal: trailing slashes are trimmed and the scheme and host are
/// lowercased. Path casing is preserved.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiUrl(String);

impl ApiUrl {
    fn normalize(input: &str) -> Result<String, Error> {
        if input.is_empty() {
            return Err(Error::InvalidUrl);
        }

        let url = Url::parse(input.trim_end_matches('/'))?;
        if !url.has_host() {
            return Err(Error::InvalidUrl);
        }

        let mut normalized = url.to_string();
        while normalized.ends_with('/') {
            normalized.pop();
        }
        Ok(normalized)
    }

    /// Join a request path onto the base, without doubling slashes
    pub fn join(&self, path: &str) -> Result<Url, Error> {
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{}/{}", self.0, path))?)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(url: &str) -> Result<Self, Self::Err> {
        Self::normalize(url).map(Self)
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
