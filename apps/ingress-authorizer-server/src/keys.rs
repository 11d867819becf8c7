//! Service-provider key material.

use std::fs;
use std::path::Path;

use anyhow::{Context, bail};

use crate::config::ServerConfig;

const CERTIFICATE_TAG: &str = "CERTIFICATE";
const PRIVATE_KEY_TAGS: [&str; 3] = ["PRIVATE KEY", "RSA PRIVATE KEY", "EC PRIVATE KEY"];

/// Signing certificate of the service provider.
///
/// The private key is only checked for presence and shape; signing happens in
/// the identity component.
#[derive(Debug, Clone)]
pub struct ServiceProviderKeys {
    certificate_der: Vec<u8>,
}

impl ServiceProviderKeys {
    /// Load the key pair named in the configuration.
    ///
    /// Returns `None` when neither file is configured.
    ///
    /// # Errors
    ///
    /// Fails if only one of the two files is configured, if a file cannot be
    /// read, or if it does not hold the expected PEM block.
    pub fn load(cfg: &ServerConfig) -> anyhow::Result<Option<Self>> {
        match (&cfg.certificate_file, &cfg.key_file) {
            (None, None) => Ok(None),
            (Some(certificate), Some(key)) => {
                let certificate_der = read_pem(certificate, &[CERTIFICATE_TAG])?;
                read_pem(key, &PRIVATE_KEY_TAGS)?;
                Ok(Some(Self { certificate_der }))
            }
            _ => bail!("key_file and certificate_file must be configured together"),
        }
    }

    #[must_use]
    pub fn from_certificate_der(certificate_der: Vec<u8>) -> Self {
        Self { certificate_der }
    }

    #[must_use]
    pub fn certificate_der(&self) -> &[u8] {
        &self.certificate_der
    }
}

fn read_pem(path: &Path, accepted_tags: &[&str]) -> anyhow::Result<Vec<u8>> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let block = pem::parse(raw).with_context(|| format!("{} is not PEM", path.display()))?;

    if !accepted_tags.contains(&block.tag()) {
        bail!(
            "{} holds a '{}' block, expected one of: {}",
            path.display(),
            block.tag(),
            accepted_tags.join(", ")
        );
    }

    Ok(block.into_contents())
}
