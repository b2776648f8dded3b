//! Error types for the transactions admin
//!
//! Listing and deleting each have their own error kind. Both are handled where they
//! occur: a [`FetchError`] puts the data source into its error state, a [`DeleteError`]
//! turns into a failure notification. Neither is ever fatal.

use crate::async_job::JobError;
use thiserror::Error;

/// Listing a page of transactions failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, DNS, timeout and other transport failures
    #[error("request failed: {0}")]
    Network(String),
    /// The server answered with a non-2xx status
    #[error("server responded with status {0}")]
    Status(u16),
    /// The body was not `{transactions, pageCount}`
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error(transparent)]
    Job(#[from] JobError),
}

/// Deleting a transaction failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeleteError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error(transparent)]
    Job(#[from] JobError),
}

/// Invalid startup configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}
