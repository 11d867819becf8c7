use std::sync::Arc;

use axum::extract::{Extension, Request};
use axum::response::Response;
use http::request::Parts;
use url::form_urlencoded;

use super::responses;
use crate::audit::RequestMeta;
use crate::domain::service::Service;

/// Query parameter naming where to send the caller once authenticated.
pub const RETURN_TARGET_PARAM: &str = "rd";

/// `GET /saml/auth`: auth subrequest target for the proxy.
#[tracing::instrument(skip_all)]
pub async fn check_access(Extension(svc): Extension<Arc<Service>>, request: Request) -> Response {
    let (parts, _body) = request.into_parts();

    match svc.check_access(&parts).await {
        Ok(attributes) => responses::accepted(&attributes),
        Err(err) => responses::error(&RequestMeta::from_parts(&parts), &err),
    }
}

/// `GET /saml/signin?rd=<url>`: error page target for anonymous callers.
#[tracing::instrument(skip_all)]
pub async fn sign_in(Extension(svc): Extension<Arc<Service>>, request: Request) -> Response {
    let (parts, _body) = request.into_parts();
    let meta = RequestMeta::from_parts(&parts);
    let return_to = return_target(&parts);

    match svc.sign_in(&parts, return_to.as_deref()).await {
        Ok(redirect) => responses::challenge(&meta, redirect),
        Err(err) => responses::error(&meta, &err),
    }
}

/// `GET /saml/whoami`
#[tracing::instrument(skip_all)]
pub async fn whoami(Extension(svc): Extension<Arc<Service>>, request: Request) -> Response {
    let (parts, _body) = request.into_parts();

    match svc.whoami(&parts).await {
        Ok(attributes) => responses::identity(&attributes),
        Err(err) => responses::error(&RequestMeta::from_parts(&parts), &err),
    }
}

/// First `rd` value of the query string; later repeats are ignored.
fn return_target(parts: &Parts) -> Option<String> {
    let query = parts.uri.query()?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == RETURN_TARGET_PARAM)
        .map(|(_, value)| value.into_owned())
}
