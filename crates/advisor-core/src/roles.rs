//! Role registry
//!
//! The three agent roles differ only in static text consumed by the
//! generation backend as framing context. They are modelled as data, not as a
//! trait hierarchy: one [`Role`] record type, three instances, constant for
//! the process lifetime.

use crate::error::UnknownRoleError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the document extraction role
pub const EXTRACTOR: &str = "extractor";
/// Name of the clause analysis role
pub const CLAUSE_ANALYZER: &str = "clause-analyzer";
/// Name of the risk detection role
pub const RISK_DETECTOR: &str = "risk-detector";

/// A named behavioral profile applied to a generation call
///
/// Objective and persona are passed verbatim to the backend; they shape output
/// quality but have no control-flow effect on the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Registry key
    pub name: String,
    /// One-sentence goal
    pub objective: String,
    /// Behavioral framing text
    pub persona: String,
    /// Whether the role may hand work to another role
    pub delegation_allowed: bool,
}

impl Role {
    /// Create new role
    #[inline]
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        objective: impl Into<String>,
        persona: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            objective: objective.into(),
            persona: persona.into(),
            delegation_allowed: false,
        }
    }

    /// System-message framing sent to the generation backend
    #[must_use]
    pub fn framing(&self) -> String {
        format!(
            "You are the {}. Your goal: {} {}",
            self.name, self.objective, self.persona
        )
    }
}

/// Immutable lookup of roles by name
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    roles: HashMap<String, Role>,
}

impl RoleRegistry {
    /// Registry with the three predefined analysis roles
    #[must_use]
    pub fn builtin() -> Self {
        let roles = [
            Role::new(
                EXTRACTOR,
                "Extract text from legal documents.",
                "Specializes in parsing legal documents and extracting raw text content.",
            ),
            Role::new(
                CLAUSE_ANALYZER,
                "Identify and summarize important legal clauses.",
                "Expert in legal terminology with experience analyzing contracts.",
            ),
            Role::new(
                RISK_DETECTOR,
                "Flag potentially risky clauses and explain the risks.",
                "Specializes in identifying legal risks and liabilities in contracts.",
            ),
        ];

        Self {
            roles: roles.into_iter().map(|r| (r.name.clone(), r)).collect(),
        }
    }

    /// Look up a role by name
    ///
    /// # Errors
    /// Returns [`UnknownRoleError`] if the role is not registered. This is a
    /// configuration defect, not a runtime condition.
    pub fn get(&self, name: &str) -> Result<&Role, UnknownRoleError> {
        self.roles
            .get(name)
            .ok_or_else(|| UnknownRoleError(name.to_string()))
    }

    /// Number of registered roles
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether the registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
