//! Audit trail for denied and failed decisions.
//!
//! Records go through `tracing` so emission never fails and never changes the
//! response already decided.

use std::fmt::Display;
use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use http::request::Parts;
use http::{Method, StatusCode, header};

/// Request details worth keeping for a denied decision.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    pub method: Method,
    pub target: String,
    pub user_agent: Option<String>,
    pub remote_addr: Option<SocketAddr>,
}

impl RequestMeta {
    /// Capture request details. The remote address is only known when the
    /// server was started with connect info.
    #[must_use]
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            method: parts.method.clone(),
            target: parts.uri.to_string(),
            user_agent: parts
                .headers
                .get(header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(ToOwned::to_owned),
            remote_addr: parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| *addr),
        }
    }
}

/// Emit one audit record for a non-success outcome.
pub fn record(meta: &RequestMeta, status: StatusCode, reason: &dyn Display) {
    let remote_ip = meta
        .remote_addr
        .map_or_else(|| "-".to_owned(), |addr| addr.to_string());

    tracing::info!(
        request_method = %meta.method,
        request_url = %meta.target,
        user_agent = meta.user_agent.as_deref().unwrap_or(""),
        remote_ip = %remote_ip,
        status_code = status.as_u16(),
        reason = %reason,
        "error response"
    );
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn parts_with(uri: &str, agent: Option<&str>, remote: Option<SocketAddr>) -> Parts {
        let mut builder = http::Request::builder().method(Method::GET).uri(uri);
        if let Some(agent) = agent {
            builder = builder.header(header::USER_AGENT, agent);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        if let Some(addr) = remote {
            parts.extensions.insert(ConnectInfo(addr));
        }
        parts
    }

    #[test]
    fn meta_captures_request_details() {
        let addr: SocketAddr = "10.0.0.7:51234".parse().unwrap();
        let meta = RequestMeta::from_parts(&parts_with(
            "/saml/auth?x=1",
            Some("curl/8.0"),
            Some(addr),
        ));

        assert_eq!(meta.method, Method::GET);
        assert_eq!(meta.target, "/saml/auth?x=1");
        assert_eq!(meta.user_agent.as_deref(), Some("curl/8.0"));
        assert_eq!(meta.remote_addr, Some(addr));
    }

    #[test]
    fn meta_tolerates_missing_agent_and_address() {
        let meta = RequestMeta::from_parts(&parts_with("/saml/whoami", None, None));
        assert!(meta.user_agent.is_none());
        assert!(meta.remote_addr.is_none());
    }

    #[test]
    #[traced_test]
    fn record_emits_structured_fields() {
        let addr: SocketAddr = "192.0.2.1:4000".parse().unwrap();
        let meta = RequestMeta::from_parts(&parts_with(
            "/saml/auth",
            Some("nginx-test"),
            Some(addr),
        ));

        record(&meta, StatusCode::UNAUTHORIZED, &"policy not satisfied");

        assert!(logs_contain("error response"));
        assert!(logs_contain("request_url=/saml/auth"));
        assert!(logs_contain("status_code=401"));
        assert!(logs_contain("remote_ip=192.0.2.1:4000"));
        assert!(logs_contain("policy not satisfied"));
    }
}
