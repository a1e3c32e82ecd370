//! Permission evaluation service

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::domain::{AuditAction, AuditLog, PermissionAction};
use crate::error::DomainError;
use crate::repositories::{AuditLogRepository, RolePermissionRepository};
use crate::security::ConditionEvaluator;

/// Matches an actor's permission grants against a requested
/// (entity, action, context) triple.
pub struct PermissionService {
    role_permissions: Arc<dyn RolePermissionRepository>,
    audit: Arc<dyn AuditLogRepository>,
    conditions: Arc<dyn ConditionEvaluator>,
}

impl PermissionService {
    pub fn new(
        role_permissions: Arc<dyn RolePermissionRepository>,
        audit: Arc<dyn AuditLogRepository>,
        conditions: Arc<dyn ConditionEvaluator>,
    ) -> Self {
        Self {
            role_permissions,
            audit,
            conditions,
        }
    }

    /// Existential check across the user's grants for (entity, action):
    /// any matching grant that is unconditional, or whose condition
    /// evaluates true against `context`, permits the request. A user
    /// holding both a conditional and an unconditional grant for the
    /// same pair is effectively unconditionally permitted.
    ///
    /// Denial is the only outcome worth recording: it appends exactly
    /// one `PERMISSION_DENIED` audit entry; success appends nothing.
    pub async fn check(
        &self,
        user_id: &Uuid,
        entity: &str,
        action: PermissionAction,
        context: &HashMap<String, Value>,
    ) -> Result<bool, DomainError> {
        let grants = self.role_permissions.permissions_for_user(user_id).await?;

        let allowed = grants
            .iter()
            .filter(|p| p.entity == entity && p.action == action)
            .any(|p| match p.condition_expression() {
                None => true,
                Some(expr) => self.conditions.evaluate(expr, context),
            });

        if allowed {
            debug!("permission granted: {}:{}", entity, action.as_str());
            return Ok(true);
        }

        warn!(
            "permission denied for user {}: {}:{}",
            user_id,
            entity,
            action.as_str()
        );
        let entry = AuditLog::new(AuditAction::PermissionDenied, entity).with_user_id(*user_id);
        if let Err(e) = self.audit.append(&entry).await {
            error!("failed to append audit entry: {}", e);
        }
        Ok(false)
    }
}
