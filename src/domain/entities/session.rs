use crate::domain::error::DomainError;
use crate::domain::values::role::Role;
use serde::Serialize;

/// Identity context handed to every operation that needs an author or a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub principal: Option<String>,
    pub role: Role,
}

impl Session {
    pub fn anonymous() -> Self {
        Self {
            principal: None,
            role: Role::User,
        }
    }

    pub fn authenticated(principal: impl Into<String>, role: Role) -> Self {
        Self {
            principal: Some(principal.into()),
            role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum AccessDecision {
    Granted { principal: String },
    Denied { reason: String },
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted { .. })
    }

    pub fn into_principal(self) -> Result<String, DomainError> {
        match self {
            AccessDecision::Granted { principal } => Ok(principal),
            AccessDecision::Denied { reason } => Err(DomainError::Unauthorized(reason)),
        }
    }
}

/// Guard for gated operations. Never panics or exits; callers branch on the decision.
pub fn authorize(session: &Session, required: Role) -> AccessDecision {
    let principal = match &session.principal {
        Some(p) if !p.trim().is_empty() => p.trim().to_string(),
        _ => {
            return AccessDecision::Denied {
                reason: "login required".to_string(),
            }
        }
    };
    if !session.role.satisfies(required) {
        return AccessDecision::Denied {
            reason: format!("{principal} lacks the {required} role"),
        };
    }
    AccessDecision::Granted { principal }
}
