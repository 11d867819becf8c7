//! Service-provider metadata document.
//!
//! Published at `/saml/metadata` and printed by `--print-metadata` so the
//! service provider can be registered with the identity provider.

use std::sync::Arc;

use anyhow::Context;
use axum::Extension;
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::header::CONTENT_TYPE;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::config::ServerConfig;
use crate::keys::ServiceProviderKeys;

pub const METADATA_PATH: &str = "/saml/metadata";
pub const METADATA_CONTENT_TYPE: &str = "application/samlmetadata+xml";

const NS_METADATA: &str = "urn:oasis:names:tc:SAML:2.0:metadata";
const NS_XMLDSIG: &str = "http://www.w3.org/2000/09/xmldsig#";
const PROTOCOL_SAML2: &str = "urn:oasis:names:tc:SAML:2.0:protocol";
const BINDING_HTTP_POST: &str = "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST";
const BINDING_HTTP_ARTIFACT: &str = "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Artifact";
const NAMEID_TRANSIENT: &str = "urn:oasis:names:tc:SAML:2.0:nameid-format:transient";

/// Rendered metadata document, built once at start-up.
#[derive(Debug, Clone)]
pub struct ServiceProviderMetadata {
    xml: String,
}

impl ServiceProviderMetadata {
    /// # Errors
    ///
    /// Fails if the assertion consumer URL cannot be derived from `url` or
    /// the document cannot be written.
    pub fn render(cfg: &ServerConfig, keys: Option<&ServiceProviderKeys>) -> anyhow::Result<Self> {
        let acs_url = cfg.acs_url()?;
        let binding = if cfg.use_artifact_response {
            BINDING_HTTP_ARTIFACT
        } else {
            BINDING_HTTP_POST
        };
        let signed = if cfg.sign_request { "true" } else { "false" };

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("md:EntityDescriptor").with_attributes([
            ("xmlns:md", NS_METADATA),
            ("entityID", cfg.entity_id.as_str()),
        ])))?;
        writer.write_event(Event::Start(BytesStart::new("md:SPSSODescriptor").with_attributes([
            ("AuthnRequestsSigned", signed),
            ("WantAssertionsSigned", "true"),
            ("protocolSupportEnumeration", PROTOCOL_SAML2),
        ])))?;

        if let Some(keys) = keys {
            let certificate = STANDARD.encode(keys.certificate_der());
            for usage in ["signing", "encryption"] {
                write_key_descriptor(&mut writer, usage, &certificate)?;
            }
        }

        write_text_element(&mut writer, "md:NameIDFormat", NAMEID_TRANSIENT)?;
        writer.write_event(Event::Empty(
            BytesStart::new("md:AssertionConsumerService").with_attributes([
                ("Binding", binding),
                ("Location", acs_url.as_str()),
                ("index", "1"),
            ]),
        ))?;
        writer.write_event(Event::End(BytesEnd::new("md:SPSSODescriptor")))?;
        writer.write_event(Event::End(BytesEnd::new("md:EntityDescriptor")))?;

        let mut xml =
            String::from_utf8(writer.into_inner()).context("metadata is not valid UTF-8")?;
        xml.push('\n');
        Ok(Self { xml })
    }

    #[must_use]
    pub fn xml(&self) -> &str {
        &self.xml
    }
}

fn write_key_descriptor(
    writer: &mut Writer<Vec<u8>>,
    usage: &str,
    certificate: &str,
) -> anyhow::Result<()> {
    writer.write_event(Event::Start(
        BytesStart::new("md:KeyDescriptor").with_attributes([("use", usage)]),
    ))?;
    writer.write_event(Event::Start(
        BytesStart::new("ds:KeyInfo").with_attributes([("xmlns:ds", NS_XMLDSIG)]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("ds:X509Data")))?;
    write_text_element(writer, "ds:X509Certificate", certificate)?;
    writer.write_event(Event::End(BytesEnd::new("ds:X509Data")))?;
    writer.write_event(Event::End(BytesEnd::new("ds:KeyInfo")))?;
    writer.write_event(Event::End(BytesEnd::new("md:KeyDescriptor")))?;
    Ok(())
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> anyhow::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// `GET /saml/metadata`
pub async fn metadata_handler(
    Extension(metadata): Extension<Arc<ServiceProviderMetadata>>,
) -> Response {
    (
        [(CONTENT_TYPE, METADATA_CONTENT_TYPE)],
        metadata.xml().to_owned(),
    )
        .into_response()
}
