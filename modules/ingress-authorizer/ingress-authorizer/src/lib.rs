#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Ingress Authorizer
//!
//! Authorization gate placed behind a reverse proxy's auth subrequest. For
//! each forwarded request it resolves the caller's session through a
//! [`SessionProviderClient`](ingress_authorizer_sdk::SessionProviderClient),
//! evaluates the session attributes against the configured [`Policy`] and
//! answers allow or deny.
//!
//! ## Endpoints
//!
//! - `GET /saml/auth` - 202 with `X-<Attribute>` headers, or 401
//! - `GET /saml/signin?rd=<url>` - starts the challenge flow for anonymous callers
//! - `GET /saml/whoami` - plain-text dump of the caller's attributes
//!
//! ## Configuration
//!
//! ```yaml
//! url: "https://auth.example.com"
//! require_attributes:
//!   - group: "admins"
//!   - name: "Alice"
//!     email: "alice@example.com"
//! ```

pub mod api;
pub mod audit;
pub mod domain;

pub use api::rest::routes::register_routes;
pub use domain::acl::Policy;
pub use domain::error::DomainError;
pub use domain::service::Service;
