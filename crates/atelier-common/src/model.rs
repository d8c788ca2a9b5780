//! Domain model for tenants, catalogs, plans, and subscriptions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tenant (studio) ID
pub type TenantId = Uuid;

/// User account ID
pub type UserId = Uuid;

/// Role of a user inside a studio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StudioRole {
    /// Studio owner; full control including billing
    Owner,
    /// Administrator; same defaults as the owner
    Admin,
    /// Staff member; content and lead work only
    Staff,
}

impl StudioRole {
    /// All roles, in precedence order
    pub fn all() -> [StudioRole; 3] {
        [Self::Owner, Self::Admin, Self::Staff]
    }

    /// Stable wire name for the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Admin => "ADMIN",
            Self::Staff => "STAFF",
        }
    }
}

/// Feature flag catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDefinition {
    /// Unique flag code, e.g. `domains.custom`
    pub code: String,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
}

/// Permission catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDefinition {
    /// Unique permission code, e.g. `billing.manage`
    pub code: String,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
}

/// Default flag state a plan grants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFeatureGrant {
    /// Plan the grant belongs to
    pub plan_code: String,
    /// Flag being granted or withheld
    pub flag_code: String,
    /// Granted state
    pub enabled: bool,
}

/// Explicit allow/deny for a (role, permission) pair
///
/// The seeded matrix is exhaustive: every permission code has a row for
/// every role, so there is no absent-means-default ambiguity at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissionGrant {
    /// Role the grant applies to
    pub role: StudioRole,
    /// Permission code
    pub perm_code: String,
    /// Whether the role may perform the action
    pub allowed: bool,
}

/// Tenant-specific flag exception; wins over plan defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantFeatureOverride {
    /// Tenant the override applies to
    pub tenant_id: TenantId,
    /// Flag code
    pub flag_code: String,
    /// Overridden state
    pub enabled: bool,
}

/// Tenant-specific permission exception; wins over role defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantPermissionOverride {
    /// Tenant the override applies to
    pub tenant_id: TenantId,
    /// Permission code
    pub perm_code: String,
    /// Overridden state
    pub allowed: bool,
}

/// Pricing plan with quota bounds
///
/// A `None` quota means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Unique plan code
    pub code: String,
    /// Display name
    pub name: String,
    /// Max live projects
    pub max_projects: Option<u32>,
    /// Max testimonials
    pub max_testimonials: Option<u32>,
    /// Max inbound quote requests per calendar month
    pub max_monthly_requests: Option<u32>,
    /// Max team seats, owner included
    pub max_users: Option<u32>,
    /// Whether premium templates are included
    pub premium_templates: bool,
    /// Whether the plan is currently sellable/usable
    pub active: bool,
}

/// Commercial status of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionStatus {
    /// Paid and current
    Active,
    /// In a trial period
    Trialing,
    /// Last payment failed; grace period may still apply
    PastDue,
    /// Canceled by the tenant or billing
    Canceled,
    /// Payment attempts exhausted
    Unpaid,
}

/// A tenant's subscription to a plan
///
/// Rows are owned by billing workflows; the entitlement core only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription ID
    pub id: Uuid,
    /// Tenant the subscription belongs to
    pub tenant_id: TenantId,
    /// Plan code
    pub plan_code: String,
    /// Commercial status
    pub status: SubscriptionStatus,
    /// Billing-side active flag
    pub active: bool,
    /// Start of the current billing period
    pub current_period_start: Option<DateTime<Utc>>,
    /// End of the current billing period; anchors the grace window
    pub current_period_end: Option<DateTime<Utc>>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// A studio: the billing/ownership unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Studio {
    /// Studio ID (doubles as the tenant ID)
    pub id: TenantId,
    /// Owning user
    pub owner_user_id: UserId,
    /// Display name
    pub name: String,
    /// Whether the studio is live
    pub active: bool,
}

/// A non-owner user's membership in a studio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudioMembership {
    /// Studio joined
    pub studio_id: TenantId,
    /// Member user
    pub user_id: UserId,
    /// Role inside the studio
    pub role: StudioRole,
    /// Join time; earliest membership wins context resolution
    pub created_at: DateTime<Utc>,
}

/// A portfolio project; only active rows count toward the quota
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project ID
    pub id: Uuid,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Display name
    pub name: String,
    /// Live flag; deactivated projects free quota
    pub active: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// A client testimonial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    /// Testimonial ID
    pub id: Uuid,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Author display name
    pub author: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// An inbound quote request; counted per calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Request ID
    pub id: Uuid,
    /// Receiving tenant
    pub tenant_id: TenantId,
    /// Arrival time; determines the billing month it counts toward
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(StudioRole::Owner.as_str(), "OWNER");
        assert_eq!(StudioRole::Admin.as_str(), "ADMIN");
        assert_eq!(StudioRole::Staff.as_str(), "STAFF");
    }

    #[test]
    fn test_all_roles_distinct() {
        let roles = StudioRole::all();
        assert_eq!(roles.len(), 3);
        assert_ne!(roles[0], roles[1]);
        assert_ne!(roles[1], roles[2]);
    }
}
