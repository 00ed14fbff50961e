//! Client for the Kollel System backend API
//!
//! This crate wraps an HTTP transport so that callers issue one request at a
//! time against a configured base URL, with JSON headers and the stored
//! session token attached automatically. Failures are not raised: every
//! call resolves into an [`ApiOutcome`] the caller branches on, and a
//! `reLogin` signal from the server clears the token and redirects to the
//! login view.
//!
//! # Example
//!
//! ```no_run
//! use std::str::FromStr;
//!
//! use kollel_client::{ApiClient, ApiOutcome, ApiUrl};
//!
//! async fn example() -> Result<(), kollel_client::Error> {
//!     let client = ApiClient::builder()
//!         .base_url(ApiUrl::from_str("https://api.kollel.example")?)
//!         .build()?;
//!
//!     match client.get("/items").await {
//!         ApiOutcome::Body(items) => println!("{items}"),
//!         ApiOutcome::ErrorResponse(response) => eprintln!("server said {}", response.status),
//!         ApiOutcome::Failure(failure) => eprintln!("{}", failure.message),
//!         ApiOutcome::SessionInvalidated => {}
//!     }
//!     Ok(())
//! }
//! ```

pub mod base_url;
pub mod client;
pub mod error;
pub mod navigator;
pub mod options;
pub mod response;
pub mod token;

pub use base_url::ApiUrl;
pub use client::{ApiClient, ApiClientBuilder, API_URL_ENV};
pub use error::Error;
pub use navigator::{Navigator, NoopNavigator, LOGIN_PATH};
pub use options::RequestOptions;
pub use response::{ApiOutcome, ErrorResponse, FailureBody, DEFAULT_FAILURE_MESSAGE};
pub use token::{MemoryTokenStore, SessionToken, TokenStore, SESSION_TOKEN_COOKIE};
