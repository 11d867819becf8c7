//! Traits implemented by the session/identity component.
//!
//! The gate never authenticates anybody itself. It asks a
//! [`SessionProviderClient`] who the caller is and, when nobody is signed in,
//! hands the request to an [`AuthFlowClient`] to begin the challenge.

use async_trait::async_trait;
use http::request::Parts;
use url::Url;

use crate::error::{AuthFlowError, SessionError};
use crate::models::{AuthFlowRedirect, Session};

/// Resolves the session attached to an inbound request.
///
/// Called exactly once per request and awaited before any decision is
/// rendered. Implementations may hit a network or a store.
#[async_trait]
pub trait SessionProviderClient: Send + Sync {
    /// Look up the caller's session.
    ///
    /// # Errors
    ///
    /// - `NoSession` if the request carries no session
    /// - `LookupFailed` if a session was presented but could not be resolved
    ///
    /// Implementations never return `NoAttributes`; that kind is produced by
    /// [`Session::into_attributes`].
    async fn get_session(&self, parts: &Parts) -> Result<Session, SessionError>;
}

/// Starts the authentication flow against the identity provider.
#[async_trait]
pub trait AuthFlowClient: Send + Sync {
    /// Begin a challenge that returns the caller to `return_to` once the
    /// identity provider has authenticated them.
    ///
    /// # Errors
    ///
    /// Returns `AuthFlowError` if no challenge can be built.
    async fn start_auth_flow(&self, return_to: &Url) -> Result<AuthFlowRedirect, AuthFlowError>;
}
