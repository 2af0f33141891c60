//! Multi-factor confirmation requirements attached to write responses.
//!
//! A write or login can come back with an [`MfaRequirement`]: the server holds
//! the operation pending until a confirmation request is sent to
//! [`MFA_VALIDATE_PATH`]. Each named constraint lists the methods that can
//! satisfy it, and any single method satisfies its constraint.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Logical path that confirmation requests are written to.
pub const MFA_VALIDATE_PATH: &str = "sys/mfa/validate";

/// An MFA requirement returned as part of a write response.
#[allow(missing_docs)]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MfaRequirement {
    /// Correlation token for the pending operation.
    pub mfa_request_id: String,
    #[serde(default)]
    pub mfa_constraints: HashMap<String, MfaConstraintAny>,
}

/// A named constraint, satisfied by any one of its methods.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MfaConstraintAny {
    #[serde(default)]
    pub any: Vec<MfaMethod>,
}

/// A single configured MFA method.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfaMethod {
    pub id: String,
    #[serde(rename = "type")]
    pub method_type: String,
    /// Whether the method expects a user-supplied code, as opposed to a
    /// push-style confirmation through an external authenticator.
    #[serde(default)]
    pub uses_passcode: bool,
}

/// Outcome of [`evaluate_requirement`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MfaDecision {
    /// The requirement can be confirmed within the current invocation using
    /// the contained method.
    AutoResolve(MfaMethod),
    /// The requirement must be confirmed out of band through
    /// [`MFA_VALIDATE_PATH`].
    Defer,
}

/// Decide whether a requirement can be resolved interactively.
///
/// Only the simplest shape is auto-resolved: exactly one constraint offering
/// exactly one method, in a session where prompting is allowed. Everything
/// else defers to an out-of-band confirmation.
pub fn evaluate_requirement(
    requirement: &MfaRequirement,
    interactive_allowed: bool,
) -> MfaDecision {
    if !interactive_allowed {
        return MfaDecision::Defer;
    }

    let mut constraints = requirement.mfa_constraints.values();
    match (constraints.next(), constraints.next()) {
        (Some(constraint), None) => match constraint.any.as_slice() {
            [method] => MfaDecision::AutoResolve(method.clone()),
            _ => MfaDecision::Defer,
        },
        _ => MfaDecision::Defer,
    }
}

/// Body of a confirmation request written to [`MFA_VALIDATE_PATH`].
#[allow(missing_docs)]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MfaValidateRequest {
    pub mfa_request_id: String,
    /// Method id mapped to the credential list for that method. A push-style
    /// method carries a single empty string.
    pub mfa_payload: HashMap<String, Vec<String>>,
}

impl MfaValidateRequest {
    /// Build the confirmation payload for a single method.
    ///
    /// The passcode is submitted exactly as collected; it may be the empty
    /// string for methods that do not use one.
    pub fn new(request_id: &str, method_id: &str, passcode: String) -> Self {
        Self {
            mfa_request_id: request_id.to_string(),
            mfa_payload: HashMap::from([(method_id.to_string(), vec![passcode])]),
        }
    }
}
