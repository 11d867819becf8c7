//! Error types for the session/identity contract.

use thiserror::Error;

/// Reasons a request yields no usable identity.
///
/// The set is closed so that callers branch exhaustively: an absent session
/// is the expected case before sign-in, everything else is a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The request carries no session at all.
    #[error("no session")]
    NoSession,

    /// A session was presented but could not be resolved (malformed,
    /// expired, unknown, or the provider failed).
    #[error("session lookup failed: {0}")]
    LookupFailed(String),

    /// The session is valid but exposes no attributes.
    #[error("session has no attributes")]
    NoAttributes,
}

/// Errors raised while starting the authentication flow.
#[derive(Debug, Error)]
pub enum AuthFlowError {
    /// The identity component is not able to build a challenge right now.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
