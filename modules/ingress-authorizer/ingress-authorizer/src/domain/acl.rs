//! Attribute-based policy matching.
//!
//! A [`Policy`] is a disjunction of [`Requirement`]s and each requirement is a
//! conjunction of `name = value` constraints. A constraint holds when the
//! caller's attribute of that name contains the value verbatim (case-sensitive,
//! no wildcards).

use ingress_authorizer_sdk::{Attributes, Requirement};
use serde::Deserialize;

/// Ordered disjunction of [`Requirement`]s.
///
/// Built once at start-up and shared read-only by every request. Order only
/// affects how early evaluation stops, never the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Policy(Vec<Requirement>);

impl Policy {
    #[must_use]
    pub fn new(requirements: Vec<Requirement>) -> Self {
        Self(requirements)
    }

    /// An empty policy allows every authenticated caller.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn requirements(&self) -> &[Requirement] {
        &self.0
    }

    #[must_use]
    pub fn is_satisfied_by(&self, attributes: &Attributes) -> bool {
        satisfies(attributes, &self.0)
    }
}

impl From<Vec<Requirement>> for Policy {
    fn from(requirements: Vec<Requirement>) -> Self {
        Self::new(requirements)
    }
}

/// Evaluate `policy` against `attributes`.
///
/// - empty policy: always `true`
/// - empty attributes with a non-empty policy: always `false`
/// - otherwise `true` iff at least one requirement is fully met
#[must_use]
pub fn satisfies(attributes: &Attributes, policy: &[Requirement]) -> bool {
    if policy.is_empty() {
        return true;
    }
    if attributes.is_empty() {
        return false;
    }
    policy
        .iter()
        .any(|requirement| requirement_met(attributes, requirement))
}

/// Every name of `requirement` must be present and hold the required value.
/// An empty requirement is vacuously met.
fn requirement_met(attributes: &Attributes, requirement: &Requirement) -> bool {
    requirement.iter().all(|(name, want)| {
        attributes
            .get(name)
            .is_some_and(|values| values.iter().any(|got| got == want))
    })
}
