//! Ingress Authorizer SDK
//!
//! This crate provides the contract between the authorization gate and the
//! session/identity component that performs the actual authentication
//! protocol exchange:
//!
//! - [`SessionProviderClient`] - Resolves the caller's session from a request
//! - [`AuthFlowClient`] - Starts the authentication (challenge) flow
//! - [`Session`], [`Attributes`], [`Requirement`] - Identity models
//! - [`SessionError`], [`AuthFlowError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use ingress_authorizer_sdk::{Session, SessionError, SessionProviderClient};
//!
//! let attributes = match sessions.get_session(&parts).await?.into_attributes() {
//!     Ok(attributes) => attributes,
//!     Err(SessionError::NoAttributes) => return deny(),
//!     Err(e) => return Err(e),
//! };
//! ```

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root
pub use api::{AuthFlowClient, SessionProviderClient};
pub use error::{AuthFlowError, SessionError};
pub use models::{Attributes, AuthFlowRedirect, Requirement, Session};
