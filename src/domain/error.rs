//! Error types for the experience client.
//!
//! This module defines the centralized error type [`Error`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with the
//! `thiserror` crate for automatic `Error` trait implementation.
//!
//! The taxonomy mirrors what can actually go wrong when talking to the
//! backend: the transport failed, the server answered with a failure, or the
//! response could not be understood. Before an error reaches a view
//! controller it is collapsed into an [`ErrorInfo`] carrying only the
//! human-readable message; controllers never branch on the variant.

use thiserror::Error;

/// The main error type for client operations.
///
/// Most variants originate in the HTTP wrapper, which performs first-line
/// normalization: transport failures get a generic message (the underlying
/// detail is logged, not surfaced), server failures prefer the message the
/// backend supplied, and anything else falls back to [`Error::Unknown`].
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response.
    ///
    /// Covers DNS failures, refused connections and timeouts. The message is
    /// intentionally generic; the transport detail is recorded via `tracing`.
    #[error("{0}")]
    Transport(String),

    /// The server answered, but with a failure.
    ///
    /// Either a non-2xx status or a 2xx response whose envelope carried
    /// `success: false`. The message prefers the server-supplied `error` or
    /// `message` field, otherwise one is synthesized from the status code.
    #[error("{message}")]
    Server {
        /// HTTP status code of the response, when one was received.
        status: Option<u16>,
        /// Human-readable failure description.
        message: String,
    },

    /// The response could not be interpreted.
    ///
    /// Fallback for malformed envelopes and payloads that fail to decode.
    #[error("{0}")]
    Unknown(String),

    /// Client configuration is invalid.
    ///
    /// Occurs before any request is made, e.g. an unparseable base URL.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Collapses the error into the message-only form handed to controllers.
    #[must_use]
    pub fn info(&self) -> ErrorInfo {
        ErrorInfo {
            message: self.to_string(),
        }
    }
}

/// Message-only error snapshot stored in request state.
///
/// Every failure reaching a view collapses to this shape; the views render
/// the message in a transient notice and offer no variant-specific handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Human-readable failure description.
    pub message: String,
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_displays_message_only() {
        let err = Error::Server {
            status: Some(404),
            message: "Not found".to_string(),
        };
        assert_eq!(err.to_string(), "Not found");
        assert_eq!(err.info().message, "Not found");
    }

    #[test]
    fn info_collapses_every_variant_to_a_message() {
        let errors = [
            Error::Transport("the server could not be reached".to_string()),
            Error::Unknown("invalid response body".to_string()),
            Error::Config("invalid base URL".to_string()),
        ];
        for err in errors {
            assert!(!err.info().message.is_empty());
        }
    }
}
