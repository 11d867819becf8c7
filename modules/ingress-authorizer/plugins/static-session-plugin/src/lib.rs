#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Session Plugin
//!
//! Implements both sides of the session/identity contract from configuration,
//! for development, end-to-end tests and demos without a live identity
//! provider.
//!
//! - Sessions are looked up by the value of a cookie (default `token`).
//!   A mapping with `attributes` yields an attribute-carrying session, a
//!   mapping without yields a session with no attribute capability.
//! - The authentication flow redirects to `sso_url` with the normalised
//!   return target in `RelayState`.
//!
//! ## Configuration
//!
//! ```yaml
//! static_session:
//!   cookie_name: "token"
//!   sso_url: "https://idp.example.com/sso"
//!   sessions:
//!     - token: "alice-session"
//!       attributes:
//!         name: ["Alice"]
//!         group: ["users", "admins"]
//!     - token: "service-session"
//! ```

pub mod config;
pub mod domain;

pub use config::StaticSessionPluginConfig;
pub use domain::Service;
