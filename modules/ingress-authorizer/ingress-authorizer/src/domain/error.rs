//! Domain errors for authorization decisions.

use http::StatusCode;
use ingress_authorizer_sdk::AuthFlowError;
use thiserror::Error;

/// Every way a decision can end without an allow.
///
/// Each variant maps to one fixed status; the message is for the audit trail
/// only and never reaches the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("missing redirect target")]
    MissingRedirectTarget,

    /// Reported as a server error although the input came from the client.
    #[error("invalid redirect target '{target}': {reason}")]
    InvalidRedirectTarget { target: String, reason: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    #[must_use]
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized(reason.into())
    }

    #[must_use]
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden(reason.into())
    }

    #[must_use]
    pub fn invalid_redirect_target(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRedirectTarget {
            target: target.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal(reason.into())
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::MissingRedirectTarget => StatusCode::BAD_REQUEST,
            Self::InvalidRedirectTarget { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<AuthFlowError> for DomainError {
    fn from(e: AuthFlowError) -> Self {
        Self::Internal(e.to_string())
    }
}
