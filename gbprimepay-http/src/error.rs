//! Error types for the HTTP client.

use http::StatusCode;

/// Errors that can occur while talking to GB Prime Pay.
///
/// Every variant carries a `context` naming the call, e.g. `"POST /v2/wechat"`.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// URL parse error.
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// Network or transport failure, including timeouts.
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// The provider answered with a non-success status.
    #[error("Unexpected HTTP status {status}: {context}: {body}")]
    HttpStatus {
        /// Human-readable context.
        context: &'static str,
        /// The HTTP status code.
        status: StatusCode,
        /// The response body.
        body: String,
    },
    /// The response body was not the expected JSON.
    #[error("Failed to decode JSON: {context}: {source}")]
    Decode {
        /// Human-readable context.
        context: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// Failed to read response body.
    #[error("Failed to read response body as text: {context}: {source}")]
    ResponseBodyRead {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    /// Returns the HTTP status the provider answered with, when known.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Http { source, .. } | Self::ResponseBodyRead { source, .. } => source.status(),
            Self::UrlParse { .. } | Self::Decode { .. } => None,
        }
    }

    /// Returns the context string of the failing call.
    #[must_use]
    pub const fn context(&self) -> &'static str {
        match self {
            Self::UrlParse { context, .. }
            | Self::Http { context, .. }
            | Self::HttpStatus { context, .. }
            | Self::Decode { context, .. }
            | Self::ResponseBodyRead { context, .. } => *context,
        }
    }
}
