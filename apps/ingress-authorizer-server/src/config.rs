//! Server configuration.
//!
//! Loaded once at start-up from a YAML file, with `AUTHORIZER_` prefixed
//! environment variables layered on top (`__` separates nested keys).

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use ingress_authorizer::Policy;
use serde::Deserialize;
use static_session_plugin::StaticSessionPluginConfig;
use url::Url;

pub const ENV_PREFIX: &str = "AUTHORIZER_";

fn default_addr() -> String {
    "0.0.0.0:8080".to_owned()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(clippy::struct_excessive_bools)]
pub struct ServerConfig {
    /// Service-provider entity id. Defaults to the metadata URL.
    #[serde(default)]
    pub entity_id: String,

    /// Public base URL of the gate; return targets are resolved against it.
    pub url: Url,

    #[serde(default)]
    pub key_file: Option<PathBuf>,

    #[serde(default)]
    pub certificate_file: Option<PathBuf>,

    /// Where the identity component fetches IdP metadata from.
    #[serde(default)]
    pub idp_metadata_url: Option<Url>,

    #[serde(default)]
    pub sign_request: bool,

    #[serde(default)]
    pub use_artifact_response: bool,

    #[serde(default)]
    pub force_authn: bool,

    #[serde(default)]
    pub allow_idp_initiated: bool,

    /// Landing page for IdP-initiated logins.
    #[serde(default)]
    pub default_redirect_uri: Option<String>,

    #[serde(default = "default_addr")]
    pub addr: String,

    /// Ordered list of requirements; any one satisfied grants access.
    #[serde(default)]
    pub require_attributes: Policy,

    #[serde(default)]
    pub static_session: StaticSessionPluginConfig,
}

impl ServerConfig {
    /// Load the configuration file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or any value does not deserialize.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.is_file() {
            bail!("configuration file {} not found", path.display());
        }

        Self::from_figment(
            Figment::new()
                .merge(Yaml::file(path))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
        .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// # Errors
    ///
    /// Fails if a value does not deserialize or the metadata URL cannot be
    /// derived from `url`.
    pub fn from_figment(figment: Figment) -> anyhow::Result<Self> {
        let mut cfg: Self = figment.extract()?;
        if cfg.entity_id.is_empty() {
            cfg.entity_id = cfg.metadata_url()?.to_string();
        }
        Ok(cfg)
    }

    /// # Errors
    ///
    /// Fails if `url` cannot be a base.
    pub fn metadata_url(&self) -> anyhow::Result<Url> {
        self.url
            .join("saml/metadata")
            .context("url cannot be used as a base")
    }

    /// # Errors
    ///
    /// Fails if `url` cannot be a base.
    pub fn acs_url(&self) -> anyhow::Result<Url> {
        self.url
            .join("saml/acs")
            .context("url cannot be used as a base")
    }
}
