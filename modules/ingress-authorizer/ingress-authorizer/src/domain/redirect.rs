//! Normalises the post-authentication return target and starts the
//! challenge flow.

use std::sync::Arc;

use ingress_authorizer_sdk::{AuthFlowClient, AuthFlowRedirect};
use tracing::debug;
use url::Url;

use super::error::DomainError;

pub struct RedirectInitiator {
    root_url: Url,
    flow: Arc<dyn AuthFlowClient>,
}

impl RedirectInitiator {
    #[must_use]
    pub fn new(root_url: Url, flow: Arc<dyn AuthFlowClient>) -> Self {
        Self { root_url, flow }
    }

    /// Resolve a caller-supplied return target against the trusted root.
    ///
    /// # Errors
    ///
    /// - `MissingRedirectTarget` if `return_to` is absent or empty
    /// - `InvalidRedirectTarget` if the joined location does not parse
    pub fn resolve_return_target(&self, return_to: Option<&str>) -> Result<Url, DomainError> {
        let target = return_to
            .filter(|t| !t.is_empty())
            .ok_or(DomainError::MissingRedirectTarget)?;

        self.root_url
            .join(target)
            .map_err(|e| DomainError::invalid_redirect_target(target, e.to_string()))
    }

    /// Start the challenge flow that brings the caller back to `return_to`.
    ///
    /// # Errors
    ///
    /// Propagates return-target errors and maps identity component failures
    /// to `Internal`.
    pub async fn begin_challenge(
        &self,
        return_to: Option<&str>,
    ) -> Result<AuthFlowRedirect, DomainError> {
        let target = self.resolve_return_target(return_to)?;
        debug!(return_to = %target, "Starting authentication flow");

        Ok(self.flow.start_auth_flow(&target).await?)
    }
}
