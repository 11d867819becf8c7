#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Ingress authorizer server
//!
//! Wires configuration, the session plugin and the decision service into one
//! HTTP router:
//!
//! - `GET /saml/auth` answers the reverse proxy's subrequest
//! - `GET /saml/signin?rd=<path>` starts the identity provider challenge
//! - `GET /saml/whoami` lists the caller's attributes
//! - `GET /saml/metadata` publishes the service-provider metadata

pub mod config;
pub mod keys;
pub mod metadata;

use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};
use ingress_authorizer::{Service, register_routes};
use ingress_authorizer_sdk::{AuthFlowClient, SessionProviderClient};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::metadata::{METADATA_PATH, ServiceProviderMetadata, metadata_handler};

/// Build the full application router.
#[must_use]
pub fn build_router(cfg: &ServerConfig, metadata: ServiceProviderMetadata) -> Router {
    let plugin = Arc::new(static_session_plugin::Service::from_config(
        &cfg.static_session,
    ));
    let sessions: Arc<dyn SessionProviderClient> = plugin.clone();
    let flow: Arc<dyn AuthFlowClient> = plugin;

    let service = Service::new(
        sessions,
        flow,
        cfg.url.clone(),
        cfg.require_attributes.clone(),
    );

    let router = Router::new()
        .route(METADATA_PATH, get(metadata_handler))
        .layer(Extension(Arc::new(metadata)));

    register_routes(router, Arc::new(service)).layer(TraceLayer::new_for_http())
}
