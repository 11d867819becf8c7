//! Decision service: routes each request through session lookup and policy
//! evaluation.
//!
//! Three outcomes exist for a caller: no session (challenge or deny),
//! authenticated but unauthorized (deny), authenticated and authorized
//! (allow). A failed lookup is final for the request; nothing is retried.

use std::sync::Arc;

use http::request::Parts;
use ingress_authorizer_sdk::{
    Attributes, AuthFlowClient, AuthFlowRedirect, SessionError, SessionProviderClient,
};
use tracing::debug;
use url::Url;

use super::acl::Policy;
use super::error::DomainError;
use super::redirect::RedirectInitiator;

pub struct Service {
    sessions: Arc<dyn SessionProviderClient>,
    redirect: RedirectInitiator,
    policy: Policy,
}

impl Service {
    #[must_use]
    pub fn new(
        sessions: Arc<dyn SessionProviderClient>,
        flow: Arc<dyn AuthFlowClient>,
        root_url: Url,
        policy: Policy,
    ) -> Self {
        Self {
            sessions,
            redirect: RedirectInitiator::new(root_url, flow),
            policy,
        }
    }

    /// Gate a forwarded request.
    ///
    /// Returns the caller's attributes when the session satisfies the policy.
    ///
    /// # Errors
    ///
    /// `Unauthorized` for any session failure or policy violation.
    #[tracing::instrument(skip_all)]
    pub async fn check_access(&self, parts: &Parts) -> Result<Attributes, DomainError> {
        let attributes = self
            .attributes(parts)
            .await
            .map_err(|e| DomainError::unauthorized(e.to_string()))?;

        if !self.policy.is_satisfied_by(&attributes) {
            return Err(DomainError::unauthorized("policy not satisfied"));
        }

        Ok(attributes)
    }

    /// Entry point for anonymous callers bounced by the proxy.
    ///
    /// Starts the challenge flow when there is no session. A caller who is
    /// already signed in should never get here: unauthorized callers get
    /// `Forbidden`, authorized ones are reported as `Internal`.
    ///
    /// # Errors
    ///
    /// - `MissingRedirectTarget` / `InvalidRedirectTarget` from the redirect initiator
    /// - `Internal` for session lookup failures and the already-authorized state
    /// - `Forbidden` for a policy violation
    #[tracing::instrument(skip_all)]
    pub async fn sign_in(
        &self,
        parts: &Parts,
        return_to: Option<&str>,
    ) -> Result<AuthFlowRedirect, DomainError> {
        let attributes = match self.attributes(parts).await {
            Ok(attributes) => attributes,
            Err(SessionError::NoSession) => {
                return self.redirect.begin_challenge(return_to).await;
            }
            Err(e @ (SessionError::LookupFailed(_) | SessionError::NoAttributes)) => {
                return Err(DomainError::internal(e.to_string()));
            }
        };

        if !self.policy.is_satisfied_by(&attributes) {
            return Err(DomainError::forbidden("policy not satisfied"));
        }

        Err(DomainError::internal(
            "authorized session reached sign-in; proxy should not have redirected",
        ))
    }

    /// Return the caller's attributes without applying the policy.
    ///
    /// Informational only: reaching this does not prove authorization.
    ///
    /// # Errors
    ///
    /// `Unauthorized` for any session failure.
    #[tracing::instrument(skip_all)]
    pub async fn whoami(&self, parts: &Parts) -> Result<Attributes, DomainError> {
        self.attributes(parts)
            .await
            .map_err(|e| DomainError::unauthorized(e.to_string()))
    }

    async fn attributes(&self, parts: &Parts) -> Result<Attributes, SessionError> {
        let session = self.sessions.get_session(parts).await?;
        let attributes = session.into_attributes()?;
        debug!(attribute_count = attributes.len(), "Resolved session attributes");
        Ok(attributes)
    }
}
