//! Client construction errors
//!
//! Only building a client can fail. A call to
//! [`ApiClient::request`](crate::ApiClient::request) never surfaces an
//! error; every failure resolves into an
//! [`ApiOutcome`](crate::ApiOutcome) arm.

use thiserror::Error;

/// Kollel client error
#[derive(Debug, Error)]
pub enum Error {
    /// Base url error
    #[error(transparent)]
    BaseUrl(#[from] crate::base_url::Error),
    /// No base URL was configured and none was found in the environment
    #[error("Base URL is not set")]
    BaseUrlNotSet,
}
