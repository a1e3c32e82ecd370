//! Audit log repository trait (port)

use async_trait::async_trait;

use crate::domain::AuditLog;
use crate::error::DomainError;

/// Append-only sink for audit entries.
///
/// Services treat appends as fire-and-forget: a failed append is logged
/// and never aborts the surrounding use case. The core never reads
/// entries back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn append(&self, entry: &AuditLog) -> Result<(), DomainError>;
}
