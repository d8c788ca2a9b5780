//! Effective feature-flag resolution

use atelier_catalog::{ensure_catalog, Catalog};
use atelier_common::error::StoreResult;
use atelier_common::model::TenantId;
use atelier_common::store::{CatalogStore, GrantStore};
use std::collections::HashMap;
use std::sync::Arc;

/// Effective flag map for a (tenant, plan) pair, covering the full catalog
pub type EffectiveFlags = HashMap<String, bool>;

/// Computes effective flags: baseline → plan grants → tenant overrides
pub struct FlagResolver<S: ?Sized> {
    store: Arc<S>,
    catalog: Catalog,
}

impl<S> FlagResolver<S>
where
    S: CatalogStore + GrantStore + ?Sized,
{
    /// Create a resolver over a store and an explicit catalog
    pub fn new(store: Arc<S>, catalog: Catalog) -> Self {
        Self { store, catalog }
    }

    /// Resolve the full catalog to booleans for a tenant on a plan.
    ///
    /// Seeding runs first so every known code gets a closed-by-default
    /// `false` baseline; an unrecognized or not-yet-granted flag never leaks
    /// a capability. An unknown plan code is not an error — the result
    /// degrades to the baseline plus any tenant overrides.
    pub async fn resolve(
        &self,
        tenant_id: TenantId,
        plan_code: &str,
    ) -> StoreResult<EffectiveFlags> {
        ensure_catalog(self.store.as_ref(), &self.catalog).await?;

        let mut out = EffectiveFlags::new();
        for code in self.store.list_flag_codes().await? {
            out.insert(code, false);
        }
        for grant in self.store.plan_feature_grants(plan_code).await? {
            out.insert(grant.flag_code, grant.enabled);
        }
        // Applied last; wins over everything
        for ov in self.store.tenant_feature_overrides(tenant_id).await? {
            out.insert(ov.flag_code, ov.enabled);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_common::model::{PlanFeatureGrant, TenantFeatureOverride};
    use atelier_common::store::InMemoryStore;
    use uuid::Uuid;

    fn resolver(store: Arc<InMemoryStore>) -> FlagResolver<InMemoryStore> {
        FlagResolver::new(store, Catalog::builtin())
    }

    #[tokio::test]
    async fn test_baseline_is_false_for_ungranted_flags() {
        let store = Arc::new(InMemoryStore::new());
        let tenant = Uuid::new_v4();

        let flags = resolver(store).resolve(tenant, "starter").await.unwrap();

        assert_eq!(flags.len(), 7);
        assert!(flags.values().all(|enabled| !enabled));
    }

    #[tokio::test]
    async fn test_plan_grants_overlay_baseline() {
        let store = Arc::new(InMemoryStore::new());
        let tenant = Uuid::new_v4();
        store.insert_plan_grant(PlanFeatureGrant {
            plan_code: "pro".into(),
            flag_code: "domains.custom".into(),
            enabled: true,
        });

        let flags = resolver(store).resolve(tenant, "pro").await.unwrap();

        assert_eq!(flags["domains.custom"], true);
        assert_eq!(flags["templates.premium"], false);
    }

    #[tokio::test]
    async fn test_tenant_override_wins_over_plan_grant() {
        let store = Arc::new(InMemoryStore::new());
        let tenant = Uuid::new_v4();
        store.insert_plan_grant(PlanFeatureGrant {
            plan_code: "pro".into(),
            flag_code: "whatsapp.automation".into(),
            enabled: true,
        });
        store.set_feature_override(TenantFeatureOverride {
            tenant_id: tenant,
            flag_code: "whatsapp.automation".into(),
            enabled: false,
        });

        let flags = resolver(store).resolve(tenant, "pro").await.unwrap();

        assert_eq!(flags["whatsapp.automation"], false);
    }

    #[tokio::test]
    async fn test_override_only_applies_to_its_tenant() {
        let store = Arc::new(InMemoryStore::new());
        let upgraded = Uuid::new_v4();
        let neighbor = Uuid::new_v4();
        store.set_feature_override(TenantFeatureOverride {
            tenant_id: upgraded,
            flag_code: "domains.custom".into(),
            enabled: true,
        });

        let resolver = resolver(store);
        let upgraded_flags = resolver.resolve(upgraded, "starter").await.unwrap();
        let neighbor_flags = resolver.resolve(neighbor, "starter").await.unwrap();

        assert_eq!(upgraded_flags["domains.custom"], true);
        assert_eq!(neighbor_flags["domains.custom"], false);
    }

    #[tokio::test]
    async fn test_starter_with_custom_domain_override_end_to_end() {
        // Plan "starter" does not grant domains.custom; tenant T1 has an
        // override flipping it on. Everything else stays at the baseline.
        let store = Arc::new(InMemoryStore::new());
        let t1 = Uuid::new_v4();
        store.set_feature_override(TenantFeatureOverride {
            tenant_id: t1,
            flag_code: "domains.custom".into(),
            enabled: true,
        });

        let flags = resolver(store).resolve(t1, "starter").await.unwrap();

        assert_eq!(flags["domains.custom"], true);
        for (code, enabled) in &flags {
            if code != "domains.custom" {
                assert!(!enabled, "{} must stay at the false baseline", code);
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_plan_code_degrades_to_baseline() {
        let store = Arc::new(InMemoryStore::new());
        let tenant = Uuid::new_v4();

        let flags = resolver(store)
            .resolve(tenant, "plan-that-never-existed")
            .await
            .unwrap();

        assert_eq!(flags.len(), 7);
        assert!(flags.values().all(|enabled| !enabled));
    }
}
