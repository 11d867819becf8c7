//! Identity models shared by the gate and the session component.

use std::collections::BTreeMap;

use crate::error::SessionError;

/// Multi-valued identity claims of an authenticated caller.
///
/// A name may carry several values (e.g. group memberships); their order is
/// the order the identity provider asserted them in.
pub type Attributes = BTreeMap<String, Vec<String>>;

/// One conjunctive clause of an access policy: every name must be present in
/// the caller's [`Attributes`] and contain the required value.
pub type Requirement = BTreeMap<String, String>;

/// A session resolved by a [`SessionProviderClient`](crate::SessionProviderClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    /// Authenticated identity carrying attributes.
    WithAttributes(Attributes),
    /// Authenticated identity without attribute retrieval.
    WithoutAttributes,
}

impl Session {
    /// Consume the session and return its attributes.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoAttributes` for sessions that expose none.
    pub fn into_attributes(self) -> Result<Attributes, SessionError> {
        match self {
            Self::WithAttributes(attributes) => Ok(attributes),
            Self::WithoutAttributes => Err(SessionError::NoAttributes),
        }
    }
}

/// Redirect answer produced when an authentication flow starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFlowRedirect {
    /// Value of the `Location` header, challenge parameters included.
    pub location: String,
}

impl AuthFlowRedirect {
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}
