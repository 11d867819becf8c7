#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the authorization endpoints
//!
//! These tests verify that:
//! 1. check-access answers 202 with attribute headers or 401
//! 2. sign-in delegates to the challenge flow only for anonymous callers
//! 3. whoami lists attributes without applying the policy
//! 4. failure bodies never carry internal detail

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode, header},
};
use http::request::Parts;
use http_body_util::BodyExt;
use ingress_authorizer::{Policy, Service, register_routes};
use ingress_authorizer_sdk::{
    Attributes, AuthFlowClient, AuthFlowError, AuthFlowRedirect, Requirement, Session,
    SessionError, SessionProviderClient,
};
use tower::ServiceExt;
use url::Url;

/// Session provider returning a fixed answer for every request
struct FixedSessions(Result<Session, SessionError>);

#[async_trait]
impl SessionProviderClient for FixedSessions {
    async fn get_session(&self, _parts: &Parts) -> Result<Session, SessionError> {
        self.0.clone()
    }
}

/// Flow that redirects to a fake IdP endpoint
struct FakeFlow;

#[async_trait]
impl AuthFlowClient for FakeFlow {
    async fn start_auth_flow(&self, return_to: &Url) -> Result<AuthFlowRedirect, AuthFlowError> {
        Ok(AuthFlowRedirect::new(format!(
            "/example?SAMLRequest=req-1&RelayState={}",
            url::form_urlencoded::byte_serialize(return_to.as_str().as_bytes()).collect::<String>()
        )))
    }
}

fn alice() -> Attributes {
    Attributes::from([
        ("name".to_owned(), vec!["Alice".to_owned()]),
        ("email".to_owned(), vec!["alice@example.com".to_owned()]),
        (
            "group".to_owned(),
            vec!["users".to_owned(), "staff".to_owned()],
        ),
    ])
}

fn requirement(name: &str, value: &str) -> Requirement {
    Requirement::from([(name.to_owned(), value.to_owned())])
}

fn router(session: Result<Session, SessionError>, policy: Vec<Requirement>) -> Router {
    let service = Service::new(
        Arc::new(FixedSessions(session)),
        Arc::new(FakeFlow),
        Url::parse("http://example.com").unwrap(),
        Policy::new(policy),
    );
    register_routes(Router::new(), Arc::new(service))
}

fn get(uri: &str) -> Request<Body> {
    let mut request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo("127.0.0.1:40000".parse::<SocketAddr>().unwrap()));
    request
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn auth_without_session_is_unauthorized_without_headers() {
    let response = router(Err(SessionError::NoSession), vec![])
        .oneshot(get("/saml/auth"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get("x-name").is_none());
    assert_eq!(body_text(response).await, "Unauthorized\n");
}

#[tokio::test]
async fn auth_with_policy_violation_is_unauthorized() {
    let response = router(
        Ok(Session::WithAttributes(alice())),
        vec![requirement("group", "admins")],
    )
    .oneshot(get("/saml/auth"))
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get("x-name").is_none());
}

#[tokio::test]
async fn auth_success_mirrors_attributes_as_headers() {
    let response = router(
        Ok(Session::WithAttributes(alice())),
        vec![
            requirement("groupX", "admins"),
            requirement("name", "Alice"),
            requirement("name", "Bob"),
        ],
    )
    .oneshot(get("/saml/auth"))
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(response.headers()["x-name"], "Alice");
    assert_eq!(response.headers()["x-email"], "alice@example.com");
    let groups: Vec<_> = response.headers().get_all("x-group").iter().collect();
    assert_eq!(groups, ["users", "staff"]);
    assert!(body_text(response).await.is_empty());
}

#[tokio::test]
async fn signin_without_session_redirects_to_identity_provider() {
    let response = router(Err(SessionError::NoSession), vec![])
        .oneshot(get("/saml/signin?rd=%2F"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(
        location.starts_with("/example?SAMLRequest="),
        "unexpected location {location}"
    );
    assert!(location.ends_with("RelayState=http%3A%2F%2Fexample.com%2F"));
}

#[tokio::test]
async fn signin_with_repeated_redirect_target_uses_first_value() {
    let response = router(Err(SessionError::NoSession), vec![])
        .oneshot(get("/saml/signin?rd=%2F&rd=%2Fother"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.ends_with("RelayState=http%3A%2F%2Fexample.com%2F"));
}

#[tokio::test]
async fn signin_without_redirect_target_is_bad_request() {
    let response = router(Err(SessionError::NoSession), vec![])
        .oneshot(get("/saml/signin"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Bad Request\n");
}

#[tokio::test]
async fn signin_with_unparsable_redirect_target_is_server_error() {
    // Literal behavior: a malformed target is reported as 500, not 400.
    let response = router(Err(SessionError::NoSession), vec![])
        .oneshot(get("/saml/signin?rd=http%3A%2F%2F%5B%3A%3A1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "Internal Server Error\n");
}

#[tokio::test]
async fn signin_with_broken_session_is_server_error() {
    let response = router(
        Err(SessionError::LookupFailed("invalid".to_owned())),
        vec![],
    )
    .oneshot(get("/saml/signin?rd=%2F"))
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(response).await;
    assert!(!body.contains("invalid"), "internal detail leaked: {body}");
}

#[tokio::test]
async fn signin_when_already_logged_in_is_server_error() {
    let response = router(Ok(Session::WithAttributes(alice())), vec![])
        .oneshot(get("/saml/signin?rd=%2F"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn signin_when_logged_in_without_permissions_is_forbidden() {
    let response = router(
        Ok(Session::WithAttributes(alice())),
        vec![requirement("group", "admins")],
    )
    .oneshot(get("/saml/signin?rd=%2F"))
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_text(response).await, "Forbidden\n");
}

#[tokio::test]
async fn whoami_without_session_is_unauthorized() {
    let response = router(Err(SessionError::NoSession), vec![])
        .oneshot(get("/saml/whoami"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn whoami_without_attribute_capability_is_unauthorized() {
    let response = router(Ok(Session::WithoutAttributes), vec![])
        .oneshot(get("/saml/whoami"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn whoami_lists_every_attribute_value() {
    let response = router(
        Ok(Session::WithAttributes(alice())),
        vec![requirement("group", "admins")],
    )
    .oneshot(get("/saml/whoami"))
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    let mut lines: Vec<_> = body.lines().collect();
    lines.sort_unstable();
    assert_eq!(
        lines,
        [
            "email: alice@example.com",
            "group: staff",
            "group: users",
            "name: Alice",
        ]
    );
}
