//! Rendering of decisions into HTTP responses.
//!
//! Failure bodies are the bare reason phrase; nothing about the internal
//! cause is exposed to the caller.

use axum::response::{IntoResponse, Response};
use http::header::{CONTENT_TYPE, LOCATION, X_CONTENT_TYPE_OPTIONS};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use ingress_authorizer_sdk::{Attributes, AuthFlowRedirect};
use tracing::warn;

use crate::audit::{self, RequestMeta};
use crate::domain::error::DomainError;

/// Prefix of the response headers that mirror session attributes.
pub const ATTRIBUTE_HEADER_PREFIX: &str = "X-";

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// `202 Accepted` with one `X-<name>` header line per attribute value.
#[must_use]
pub fn accepted(attributes: &Attributes) -> Response {
    (StatusCode::ACCEPTED, attribute_headers(attributes)).into_response()
}

/// `200 OK` listing every attribute value as `<name>: <value>`.
#[must_use]
pub fn identity(attributes: &Attributes) -> Response {
    let body: String = attributes
        .iter()
        .flat_map(|(name, values)| values.iter().map(move |value| format!("{name}: {value}\n")))
        .collect();

    (StatusCode::OK, [(CONTENT_TYPE, TEXT_PLAIN)], body).into_response()
}

/// `302 Found` towards the identity provider.
#[must_use]
pub fn challenge(meta: &RequestMeta, redirect: AuthFlowRedirect) -> Response {
    match HeaderValue::try_from(redirect.location) {
        Ok(location) => (StatusCode::FOUND, [(LOCATION, location)]).into_response(),
        Err(e) => error(meta, &DomainError::internal(format!("invalid challenge location: {e}"))),
    }
}

/// Audit a failed decision and answer with its status.
#[must_use]
pub fn error(meta: &RequestMeta, err: &DomainError) -> Response {
    let status = err.status();
    audit::record(meta, status, err);
    status_text(status)
}

fn status_text(status: StatusCode) -> Response {
    let reason = status.canonical_reason().unwrap_or_default();
    (
        status,
        [(CONTENT_TYPE, TEXT_PLAIN), (X_CONTENT_TYPE_OPTIONS, "nosniff")],
        format!("{reason}\n"),
    )
        .into_response()
}

fn attribute_headers(attributes: &Attributes) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, values) in attributes {
        let Ok(header_name) = HeaderName::try_from(format!("{ATTRIBUTE_HEADER_PREFIX}{name}"))
        else {
            warn!(attribute = %name, "Skipping attribute that is not a valid header name");
            continue;
        };
        for value in values {
            if let Ok(value) = HeaderValue::try_from(value.as_str()) {
                headers.append(header_name.clone(), value);
            } else {
                warn!(attribute = %name, "Skipping attribute value that is not a valid header value");
            }
        }
    }
    headers
}
