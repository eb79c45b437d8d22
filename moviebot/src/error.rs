use reqwest::StatusCode;
use thiserror::Error;

/// An error that occured while talking to one of the upstream services
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent, timed out, or the body could not be decoded
    #[error("request failed: {0}")]
    Request(reqwest::Error),
    /// The service answered with a non-success status
    #[error("service responded with status {0}")]
    Status(StatusCode),
}

impl From<reqwest::Error> for ClientError {
    // Request URLs carry the API keys.
    fn from(err: reqwest::Error) -> Self {
        ClientError::Request(err.without_url())
    }
}

/// An error that occured while loading configuration from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable was not set (or was empty)
    #[error("expected {0} to be set in the environment")]
    Missing(&'static str),
    /// A variable was set but could not be parsed
    #[error("invalid value for {var}: {reason}")]
    Invalid {
        /// The variable name
        var: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}
