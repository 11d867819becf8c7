//! Service implementation for the static session plugin.

use std::collections::HashMap;

use http::HeaderMap;
use http::header::COOKIE;
use ingress_authorizer_sdk::{Attributes, Session, SessionError};
use url::Url;
use url::form_urlencoded::byte_serialize;

use crate::config::StaticSessionPluginConfig;

/// Static session service.
///
/// Resolves sessions from a cookie against configured tokens and builds
/// challenge redirects towards a fixed identity provider location.
pub struct Service {
    cookie_name: String,
    sso_url: String,
    sessions: HashMap<String, Option<Attributes>>,
}

impl Service {
    /// Create a service from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticSessionPluginConfig) -> Self {
        let sessions = cfg
            .sessions
            .iter()
            .map(|m| (m.token.clone(), m.attributes.clone()))
            .collect();

        Self {
            cookie_name: cfg.cookie_name.clone(),
            sso_url: cfg.sso_url.clone(),
            sessions,
        }
    }

    /// Resolve the session carried by the request headers.
    ///
    /// # Errors
    ///
    /// - `NoSession` if the session cookie is absent
    /// - `LookupFailed` if the cookie is empty or names no configured session
    pub fn lookup(&self, headers: &HeaderMap) -> Result<Session, SessionError> {
        let token =
            extract_session_cookie(headers, &self.cookie_name).ok_or(SessionError::NoSession)?;
        if token.is_empty() {
            return Err(SessionError::LookupFailed("empty session token".to_owned()));
        }

        match self.sessions.get(token) {
            Some(Some(attributes)) => Ok(Session::WithAttributes(attributes.clone())),
            Some(None) => Ok(Session::WithoutAttributes),
            None => Err(SessionError::LookupFailed(
                "unknown session token".to_owned(),
            )),
        }
    }

    /// Location of the challenge that returns the caller to `return_to`.
    #[must_use]
    pub fn challenge_location(&self, return_to: &Url) -> String {
        let separator = if self.sso_url.contains('?') { '&' } else { '?' };
        let relay_state: String = byte_serialize(return_to.as_str().as_bytes()).collect();
        format!("{}{separator}RelayState={relay_state}", self.sso_url)
    }
}

/// Find the named cookie across every `Cookie` header of the request.
fn extract_session_cookie<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            (name == cookie_name).then_some(value)
        })
}
