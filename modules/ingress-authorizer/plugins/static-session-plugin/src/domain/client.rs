//! Client implementations for the static session plugin.
//!
//! Implements `SessionProviderClient` and `AuthFlowClient` using the domain service.

use async_trait::async_trait;
use http::request::Parts;
use ingress_authorizer_sdk::{
    AuthFlowClient, AuthFlowError, AuthFlowRedirect, Session, SessionError, SessionProviderClient,
};
use tracing::debug;
use url::Url;

use super::service::Service;

#[async_trait]
impl SessionProviderClient for Service {
    async fn get_session(&self, parts: &Parts) -> Result<Session, SessionError> {
        self.lookup(&parts.headers)
            .inspect_err(|e| debug!(error = %e, "Static session lookup failed"))
    }
}

#[async_trait]
impl AuthFlowClient for Service {
    async fn start_auth_flow(&self, return_to: &Url) -> Result<AuthFlowRedirect, AuthFlowError> {
        let location = self.challenge_location(return_to);
        debug!(%location, "Redirecting to static SSO endpoint");
        Ok(AuthFlowRedirect::new(location))
    }
}
