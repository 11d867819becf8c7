//! Configuration for the static session plugin.

use ingress_authorizer_sdk::Attributes;
use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticSessionPluginConfig {
    /// Name of the cookie carrying the session token.
    pub cookie_name: String,

    /// Identity provider location the challenge redirects to.
    pub sso_url: String,

    /// Static token-to-session mappings.
    pub sessions: Vec<SessionMapping>,
}

impl Default for StaticSessionPluginConfig {
    fn default() -> Self {
        Self {
            cookie_name: "token".to_owned(),
            sso_url: "/sso".to_owned(),
            sessions: Vec::new(),
        }
    }
}

/// Maps a session token to an identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionMapping {
    /// The cookie value to match.
    pub token: String,
    /// Attributes of the session; `None` for a session without attributes.
    #[serde(default)]
    pub attributes: Option<Attributes>,
}
