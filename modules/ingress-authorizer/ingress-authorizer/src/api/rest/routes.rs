use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

pub const AUTH_PATH: &str = "/saml/auth";
pub const SIGNIN_PATH: &str = "/saml/signin";
pub const WHOAMI_PATH: &str = "/saml/whoami";

/// Mount the decision endpoints on `router`.
#[must_use]
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route(AUTH_PATH, get(handlers::check_access))
        .route(SIGNIN_PATH, get(handlers::sign_in))
        .route(WHOAMI_PATH, get(handlers::whoami))
        .layer(Extension(service))
}
