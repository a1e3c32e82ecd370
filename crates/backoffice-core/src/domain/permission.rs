//! Permission grant entity

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Action enumeration for permission grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PermissionAction {
    Read,
    Create,
    Update,
    Delete,
    Approve,
}

impl PermissionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionAction::Read => "READ",
            PermissionAction::Create => "CREATE",
            PermissionAction::Update => "UPDATE",
            PermissionAction::Delete => "DELETE",
            PermissionAction::Approve => "APPROVE",
        }
    }
}

impl FromStr for PermissionAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "READ" => Ok(PermissionAction::Read),
            "CREATE" => Ok(PermissionAction::Create),
            "UPDATE" => Ok(PermissionAction::Update),
            "DELETE" => Ok(PermissionAction::Delete),
            "APPROVE" => Ok(PermissionAction::Approve),
            other => Err(DomainError::ValidationError(format!(
                "unknown permission action: {other}"
            ))),
        }
    }
}

/// An authorization grant descriptor: (entity, action, optional condition).
///
/// Grants are bound to users indirectly through role assignment; this
/// entity knows nothing about roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    pub id: Uuid,
    pub entity: String,
    pub action: PermissionAction,
    pub condition: Option<String>,
    pub description: Option<String>,
}

impl Permission {
    pub fn new(entity: impl Into<String>, action: PermissionAction) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity: entity.into(),
            action,
            condition: None,
            description: None,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// The condition expression, if one is present and non-blank.
    pub fn condition_expression(&self) -> Option<&str> {
        self.condition
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    pub fn has_condition(&self) -> bool {
        self.condition_expression().is_some()
    }

    /// Claim string embedded in access tokens: `"<entity>:<ACTION>"`,
    /// entity case-preserved.
    pub fn claim(&self) -> String {
        format!("{}:{}", self.entity, self.action.as_str())
    }
}
