//! Persistence abstraction for the entitlement core
//!
//! Repository pattern:
//! - Abstracts store details behind async traits
//! - Upserts are individually atomic per row; there is no batch transaction,
//!   so concurrent seeders converge without external locking
//! - Store-level uniqueness on each layer's key tuple keeps every code to at
//!   most one value per layer

use crate::error::StoreResult;
use crate::model::*;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// Catalog reference data: upsert-by-unique-key writes and code listings
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Create or update a flag definition by code
    async fn upsert_feature(&self, def: FeatureDefinition) -> StoreResult<()>;

    /// Create or update a permission definition by code
    async fn upsert_permission(&self, def: PermissionDefinition) -> StoreResult<()>;

    /// Create or update a (role, permission) grant row
    async fn upsert_role_grant(&self, grant: RolePermissionGrant) -> StoreResult<()>;

    /// All known flag codes
    async fn list_flag_codes(&self) -> StoreResult<Vec<String>>;

    /// All known permission codes
    async fn list_permission_codes(&self) -> StoreResult<Vec<String>>;
}

/// Plan defaults and tenant overrides, one precedence layer per call
#[async_trait]
pub trait GrantStore: Send + Sync {
    /// Flag grants for a plan; empty for an unknown plan code
    async fn plan_feature_grants(&self, plan_code: &str) -> StoreResult<Vec<PlanFeatureGrant>>;

    /// Permission grants for a role; exhaustive once the catalog is seeded
    async fn role_permission_grants(&self, role: StudioRole)
        -> StoreResult<Vec<RolePermissionGrant>>;

    /// Tenant flag overrides; the highest-precedence layer
    async fn tenant_feature_overrides(
        &self,
        tenant_id: TenantId,
    ) -> StoreResult<Vec<TenantFeatureOverride>>;

    /// Tenant permission overrides; the highest-precedence layer
    async fn tenant_permission_overrides(
        &self,
        tenant_id: TenantId,
    ) -> StoreResult<Vec<TenantPermissionOverride>>;
}

/// Subscription and plan rows; read-only from the core's perspective
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// The tenant's subscription joined with its plan, if any
    async fn subscription_with_plan(
        &self,
        tenant_id: TenantId,
    ) -> StoreResult<Option<(Subscription, Plan)>>;
}

/// Count-by-filter over bounded resources
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// Live (active) projects for a tenant
    async fn count_active_projects(&self, tenant_id: TenantId) -> StoreResult<u64>;

    /// Testimonials for a tenant
    async fn count_testimonials(&self, tenant_id: TenantId) -> StoreResult<u64>;

    /// Quote requests created in the half-open window `[start, end)`
    async fn count_quote_requests_between(
        &self,
        tenant_id: TenantId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<u64>;

    /// Non-owner member rows for a tenant
    async fn count_members(&self, tenant_id: TenantId) -> StoreResult<u64>;
}

/// Studio/user directory lookups
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Studio by ID
    async fn studio(&self, id: TenantId) -> StoreResult<Option<Studio>>;

    /// The studio a user owns, if any
    async fn owned_studio(&self, user_id: UserId) -> StoreResult<Option<Studio>>;

    /// The user's oldest membership (find-first ordered by join time)
    async fn earliest_membership(&self, user_id: UserId)
        -> StoreResult<Option<StudioMembership>>;
}

/// In-memory store (tests and development)
///
/// Write helpers model the external workflows that own each table:
/// tenant management writes overrides, billing writes plans/subscriptions.
#[derive(Default)]
pub struct InMemoryStore {
    features: RwLock<HashMap<String, FeatureDefinition>>,
    permissions: RwLock<HashMap<String, PermissionDefinition>>,
    role_grants: RwLock<HashMap<(StudioRole, String), RolePermissionGrant>>,
    plan_grants: RwLock<HashMap<(String, String), PlanFeatureGrant>>,
    feature_overrides: RwLock<HashMap<(TenantId, String), TenantFeatureOverride>>,
    permission_overrides: RwLock<HashMap<(TenantId, String), TenantPermissionOverride>>,
    plans: RwLock<HashMap<String, Plan>>,
    subscriptions: RwLock<HashMap<TenantId, Subscription>>,
    studios: RwLock<HashMap<TenantId, Studio>>,
    memberships: RwLock<Vec<StudioMembership>>,
    projects: RwLock<HashMap<Uuid, Project>>,
    testimonials: RwLock<HashMap<Uuid, Testimonial>>,
    quote_requests: RwLock<HashMap<Uuid, QuoteRequest>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a plan row
    pub fn insert_plan(&self, plan: Plan) {
        self.plans.write().insert(plan.code.clone(), plan);
    }

    /// Insert or replace a plan flag grant row
    pub fn insert_plan_grant(&self, grant: PlanFeatureGrant) {
        self.plan_grants
            .write()
            .insert((grant.plan_code.clone(), grant.flag_code.clone()), grant);
    }

    /// Insert or replace the tenant's subscription
    pub fn upsert_subscription(&self, sub: Subscription) {
        self.subscriptions.write().insert(sub.tenant_id, sub);
    }

    /// Set a tenant flag override
    pub fn set_feature_override(&self, ov: TenantFeatureOverride) {
        self.feature_overrides
            .write()
            .insert((ov.tenant_id, ov.flag_code.clone()), ov);
    }

    /// Set a tenant permission override
    pub fn set_permission_override(&self, ov: TenantPermissionOverride) {
        self.permission_overrides
            .write()
            .insert((ov.tenant_id, ov.perm_code.clone()), ov);
    }

    /// Insert or replace a studio
    pub fn insert_studio(&self, studio: Studio) {
        self.studios.write().insert(studio.id, studio);
    }

    /// Append a membership row
    pub fn insert_membership(&self, membership: StudioMembership) {
        self.memberships.write().push(membership);
    }

    /// Insert a project
    pub fn insert_project(&self, project: Project) {
        self.projects.write().insert(project.id, project);
    }

    /// Toggle a project's live flag
    pub fn set_project_active(&self, id: Uuid, active: bool) {
        if let Some(project) = self.projects.write().get_mut(&id) {
            project.active = active;
        }
    }

    /// Insert a testimonial
    pub fn insert_testimonial(&self, testimonial: Testimonial) {
        self.testimonials.write().insert(testimonial.id, testimonial);
    }

    /// Insert a quote request
    pub fn insert_quote_request(&self, request: QuoteRequest) {
        self.quote_requests.write().insert(request.id, request);
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn upsert_feature(&self, def: FeatureDefinition) -> StoreResult<()> {
        self.features.write().insert(def.code.clone(), def);
        Ok(())
    }

    async fn upsert_permission(&self, def: PermissionDefinition) -> StoreResult<()> {
        self.permissions.write().insert(def.code.clone(), def);
        Ok(())
    }

    async fn upsert_role_grant(&self, grant: RolePermissionGrant) -> StoreResult<()> {
        self.role_grants
            .write()
            .insert((grant.role, grant.perm_code.clone()), grant);
        Ok(())
    }

    async fn list_flag_codes(&self) -> StoreResult<Vec<String>> {
        Ok(self.features.read().keys().cloned().collect())
    }

    async fn list_permission_codes(&self) -> StoreResult<Vec<String>> {
        Ok(self.permissions.read().keys().cloned().collect())
    }
}

#[async_trait]
impl GrantStore for InMemoryStore {
    async fn plan_feature_grants(&self, plan_code: &str) -> StoreResult<Vec<PlanFeatureGrant>> {
        Ok(self
            .plan_grants
            .read()
            .values()
            .filter(|g| g.plan_code == plan_code)
            .cloned()
            .collect())
    }

    async fn role_permission_grants(
        &self,
        role: StudioRole,
    ) -> StoreResult<Vec<RolePermissionGrant>> {
        Ok(self
            .role_grants
            .read()
            .values()
            .filter(|g| g.role == role)
            .cloned()
            .collect())
    }

    async fn tenant_feature_overrides(
        &self,
        tenant_id: TenantId,
    ) -> StoreResult<Vec<TenantFeatureOverride>> {
        Ok(self
            .feature_overrides
            .read()
            .values()
            .filter(|o| o.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn tenant_permission_overrides(
        &self,
        tenant_id: TenantId,
    ) -> StoreResult<Vec<TenantPermissionOverride>> {
        Ok(self
            .permission_overrides
            .read()
            .values()
            .filter(|o| o.tenant_id == tenant_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SubscriptionStore for InMemoryStore {
    async fn subscription_with_plan(
        &self,
        tenant_id: TenantId,
    ) -> StoreResult<Option<(Subscription, Plan)>> {
        let sub = match self.subscriptions.read().get(&tenant_id) {
            Some(sub) => sub.clone(),
            None => return Ok(None),
        };
        let plan = self.plans.read().get(&sub.plan_code).cloned();
        match plan {
            Some(plan) => Ok(Some((sub, plan))),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UsageStore for InMemoryStore {
    async fn count_active_projects(&self, tenant_id: TenantId) -> StoreResult<u64> {
        Ok(self
            .projects
            .read()
            .values()
            .filter(|p| p.tenant_id == tenant_id && p.active)
            .count() as u64)
    }

    async fn count_testimonials(&self, tenant_id: TenantId) -> StoreResult<u64> {
        Ok(self
            .testimonials
            .read()
            .values()
            .filter(|t| t.tenant_id == tenant_id)
            .count() as u64)
    }

    async fn count_quote_requests_between(
        &self,
        tenant_id: TenantId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<u64> {
        Ok(self
            .quote_requests
            .read()
            .values()
            .filter(|r| r.tenant_id == tenant_id && r.created_at >= start && r.created_at < end)
            .count() as u64)
    }

    async fn count_members(&self, tenant_id: TenantId) -> StoreResult<u64> {
        Ok(self
            .memberships
            .read()
            .iter()
            .filter(|m| m.studio_id == tenant_id)
            .count() as u64)
    }
}

#[async_trait]
impl DirectoryStore for InMemoryStore {
    async fn studio(&self, id: TenantId) -> StoreResult<Option<Studio>> {
        Ok(self.studios.read().get(&id).cloned())
    }

    async fn owned_studio(&self, user_id: UserId) -> StoreResult<Option<Studio>> {
        Ok(self
            .studios
            .read()
            .values()
            .find(|s| s.owner_user_id == user_id)
            .cloned())
    }

    async fn earliest_membership(
        &self,
        user_id: UserId,
    ) -> StoreResult<Option<StudioMembership>> {
        Ok(self
            .memberships
            .read()
            .iter()
            .filter(|m| m.user_id == user_id)
            .min_by_key(|m| m.created_at)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn flag(code: &str, name: &str) -> FeatureDefinition {
        FeatureDefinition {
            code: code.into(),
            name: name.into(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_feature_upsert_replaces() {
        let store = InMemoryStore::new();

        store.upsert_feature(flag("domains.custom", "Old")).await.unwrap();
        store.upsert_feature(flag("domains.custom", "Custom domain")).await.unwrap();

        let codes = store.list_flag_codes().await.unwrap();
        assert_eq!(codes, vec!["domains.custom".to_string()]);
        assert_eq!(
            store.features.read().get("domains.custom").unwrap().name,
            "Custom domain"
        );
    }

    #[tokio::test]
    async fn test_override_uniqueness_per_key() {
        let store = InMemoryStore::new();
        let tenant = Uuid::new_v4();

        store.set_feature_override(TenantFeatureOverride {
            tenant_id: tenant,
            flag_code: "domains.custom".into(),
            enabled: true,
        });
        store.set_feature_override(TenantFeatureOverride {
            tenant_id: tenant,
            flag_code: "domains.custom".into(),
            enabled: false,
        });

        let overrides = store.tenant_feature_overrides(tenant).await.unwrap();
        assert_eq!(overrides.len(), 1);
        assert!(!overrides[0].enabled);
    }

    #[tokio::test]
    async fn test_inactive_projects_do_not_count() {
        let store = InMemoryStore::new();
        let tenant = Uuid::new_v4();

        let live = Project {
            id: Uuid::new_v4(),
            tenant_id: tenant,
            name: "Wedding".into(),
            active: true,
            created_at: Utc::now(),
        };
        let archived = Project {
            id: Uuid::new_v4(),
            tenant_id: tenant,
            name: "Old shoot".into(),
            active: false,
            created_at: Utc::now(),
        };
        store.insert_project(live);
        store.insert_project(archived);

        assert_eq!(store.count_active_projects(tenant).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_quote_request_window_is_half_open() {
        let store = InMemoryStore::new();
        let tenant = Uuid::new_v4();
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();

        // At the lower bound: counts
        store.insert_quote_request(QuoteRequest {
            id: Uuid::new_v4(),
            tenant_id: tenant,
            created_at: start,
        });
        // At the upper bound: excluded
        store.insert_quote_request(QuoteRequest {
            id: Uuid::new_v4(),
            tenant_id: tenant,
            created_at: end,
        });

        assert_eq!(
            store
                .count_quote_requests_between(tenant, start, end)
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_earliest_membership_ordering() {
        let store = InMemoryStore::new();
        let user = Uuid::new_v4();
        let first_studio = Uuid::new_v4();
        let second_studio = Uuid::new_v4();

        store.insert_membership(StudioMembership {
            studio_id: second_studio,
            user_id: user,
            role: StudioRole::Staff,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        });
        store.insert_membership(StudioMembership {
            studio_id: first_studio,
            user_id: user,
            role: StudioRole::Admin,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        });

        let membership = store.earliest_membership(user).await.unwrap().unwrap();
        assert_eq!(membership.studio_id, first_studio);
        assert_eq!(membership.role, StudioRole::Admin);
    }
}
