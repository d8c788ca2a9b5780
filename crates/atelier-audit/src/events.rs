//! Usage and audit event shapes

use atelier_common::model::{TenantId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of billable/meterable activity happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsageKind {
    /// A project was created
    ProjectCreated,
    /// A testimonial was created
    TestimonialCreated,
    /// An inbound quote request arrived
    QuoteRequestReceived,
    /// A team member was added
    MemberAdded,
    /// A premium template was applied
    TemplateApplied,
}

/// A metered usage event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEvent {
    /// Tenant the usage belongs to
    pub tenant_id: TenantId,
    /// Activity kind
    pub kind: UsageKind,
    /// How many units; defaults to 1
    pub quantity: u32,
    /// Free-form context
    pub metadata: Option<serde_json::Value>,
    /// When the event was recorded
    pub recorded_at: DateTime<Utc>,
}

impl UsageEvent {
    /// Single-unit event for a tenant
    pub fn new(tenant_id: TenantId, kind: UsageKind) -> Self {
        Self {
            tenant_id,
            kind,
            quantity: 1,
            metadata: None,
            recorded_at: Utc::now(),
        }
    }

    /// Set the unit count
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Attach free-form context
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// An audit-trail entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Action name, e.g. `project.create`
    pub action: String,
    /// User who performed the action, when known
    pub actor_user_id: Option<UserId>,
    /// Tenant scope, when known
    pub tenant_id: Option<TenantId>,
    /// Entity type touched
    pub entity: Option<String>,
    /// Entity identifier touched
    pub entity_id: Option<String>,
    /// Free-form context
    pub metadata: Option<serde_json::Value>,
    /// Request origin IP
    pub ip: Option<String>,
    /// Request user agent
    pub user_agent: Option<String>,
    /// When the entry was recorded
    pub recorded_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Minimal entry with just an action name
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            actor_user_id: None,
            tenant_id: None,
            entity: None,
            entity_id: None,
            metadata: None,
            ip: None,
            user_agent: None,
            recorded_at: Utc::now(),
        }
    }

    /// Set the acting user
    pub fn by(mut self, actor: UserId) -> Self {
        self.actor_user_id = Some(actor);
        self
    }

    /// Set the tenant scope
    pub fn for_tenant(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    /// Set the entity touched
    pub fn on(mut self, entity: impl Into<String>, entity_id: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self.entity_id = Some(entity_id.into());
        self
    }
}
