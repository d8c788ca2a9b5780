//! Fire-and-forget recording

use crate::events::{AuditEntry, UsageEvent};
use async_trait::async_trait;
use atelier_common::error::StoreResult;
use parking_lot::RwLock;
use std::sync::Arc;

/// Append-only sink for usage events and audit entries
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Append a usage event
    async fn append_usage(&self, event: UsageEvent) -> StoreResult<()>;

    /// Append an audit entry
    async fn append_audit(&self, entry: AuditEntry) -> StoreResult<()>;
}

/// In-memory sink (tests and development)
#[derive(Default)]
pub struct InMemoryAuditSink {
    usage: RwLock<Vec<UsageEvent>>,
    audit: RwLock<Vec<AuditEntry>>,
}

impl InMemoryAuditSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded usage events
    pub fn usage_events(&self) -> Vec<UsageEvent> {
        self.usage.read().clone()
    }

    /// Recorded audit entries
    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.audit.read().clone()
    }
}

#[async_trait]
impl AuditSink for InMemoryAuditSink {
    async fn append_usage(&self, event: UsageEvent) -> StoreResult<()> {
        self.usage.write().push(event);
        Ok(())
    }

    async fn append_audit(&self, entry: AuditEntry) -> StoreResult<()> {
        self.audit.write().push(entry);
        Ok(())
    }
}

/// Best-effort recorder in front of a sink.
///
/// Sink failures must never abort or alter the caller's outcome: they are
/// logged at `warn` and swallowed.
pub struct AuditRecorder<S: ?Sized> {
    sink: Arc<S>,
}

impl<S> AuditRecorder<S>
where
    S: AuditSink + ?Sized,
{
    /// Create a recorder over a sink
    pub fn new(sink: Arc<S>) -> Self {
        Self { sink }
    }

    /// Record a usage event, best-effort
    pub async fn track_usage(&self, event: UsageEvent) {
        if let Err(e) = self.sink.append_usage(event).await {
            tracing::warn!("usage event dropped: {}", e);
        }
    }

    /// Record an audit entry, best-effort
    pub async fn log(&self, entry: AuditEntry) {
        if let Err(e) = self.sink.append_audit(entry).await {
            tracing::warn!("audit entry dropped: {}", e);
        }
    }
}
