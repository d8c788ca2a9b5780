//! Effective permission resolution

use atelier_catalog::{ensure_catalog, Catalog};
use atelier_common::error::StoreResult;
use atelier_common::model::{StudioRole, TenantId};
use atelier_common::store::{CatalogStore, GrantStore};
use std::collections::HashMap;
use std::sync::Arc;

/// Effective permission map for a (tenant, role) pair
pub type EffectivePermissions = HashMap<String, bool>;

/// Computes effective permissions: role matrix → tenant overrides
pub struct PermissionResolver<S: ?Sized> {
    store: Arc<S>,
    catalog: Catalog,
}

impl<S> PermissionResolver<S>
where
    S: CatalogStore + GrantStore + ?Sized,
{
    /// Create a resolver over a store and an explicit catalog
    pub fn new(store: Arc<S>, catalog: Catalog) -> Self {
        Self { store, catalog }
    }

    /// Resolve the effective permission map for a tenant and role.
    ///
    /// Seeding guarantees the role matrix is exhaustive (grants and explicit
    /// denials for every permission code), so the role layer already covers
    /// the whole catalog and no separate false baseline is needed.
    pub async fn resolve(
        &self,
        tenant_id: TenantId,
        role: StudioRole,
    ) -> StoreResult<EffectivePermissions> {
        ensure_catalog(self.store.as_ref(), &self.catalog).await?;

        let mut out = EffectivePermissions::new();
        for grant in self.store.role_permission_grants(role).await? {
            out.insert(grant.perm_code, grant.allowed);
        }
        for ov in self.store.tenant_permission_overrides(tenant_id).await? {
            out.insert(ov.perm_code, ov.allowed);
        }
        Ok(out)
    }
}
