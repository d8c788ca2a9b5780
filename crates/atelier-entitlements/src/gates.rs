//! Access gates for the request-handling layer
//!
//! The transport layer calls these before a handler runs, then maps deny
//! outcomes to status codes at the boundary: unresolved tenant → 401,
//! blocked feature → 402, denied permission → 403. That mapping belongs to
//! the caller, not to this crate.

use crate::context::resolve_tenant_for_user;
use crate::flags::{EffectiveFlags, FlagResolver};
use crate::permissions::{EffectivePermissions, PermissionResolver};
use atelier_catalog::Catalog;
use atelier_common::error::StoreResult;
use atelier_common::model::UserId;
use atelier_common::store::{CatalogStore, DirectoryStore, GrantStore, SubscriptionStore};
use std::sync::Arc;

/// Outcome of a gate check
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// Allowed; carries the resolved map for downstream reuse
    Granted(std::collections::HashMap<String, bool>),
    /// The feature is not part of the tenant's effective flags
    FeatureBlocked {
        /// Flag that was required
        flag: String,
    },
    /// The role (after overrides) lacks the permission
    PermissionDenied {
        /// Permission that was required
        permission: String,
    },
    /// Caller misuse: no tenant could be resolved for the user
    UnresolvedTenant,
}

/// Feature and permission gating over a resolved tenant context
pub struct AccessGate<S: ?Sized> {
    store: Arc<S>,
    flags: FlagResolver<S>,
    permissions: PermissionResolver<S>,
}

impl<S> AccessGate<S>
where
    S: CatalogStore + GrantStore + SubscriptionStore + DirectoryStore + ?Sized,
{
    /// Create a gate over a store and an explicit catalog
    pub fn new(store: Arc<S>, catalog: Catalog) -> Self {
        Self {
            flags: FlagResolver::new(store.clone(), catalog.clone()),
            permissions: PermissionResolver::new(store.clone(), catalog),
            store,
        }
    }

    /// Require a feature flag for the studio the user acts for.
    ///
    /// Without a subscription the plan layer is empty and resolution
    /// degrades to the baseline plus tenant overrides.
    pub async fn require_feature(&self, user_id: UserId, flag: &str) -> StoreResult<GateDecision> {
        let ctx = match resolve_tenant_for_user(self.store.as_ref(), user_id).await? {
            Some(ctx) => ctx,
            None => return Ok(GateDecision::UnresolvedTenant),
        };
        let plan_code = match self.store.subscription_with_plan(ctx.tenant_id).await? {
            Some((_, plan)) => plan.code,
            None => String::new(),
        };

        let resolved: EffectiveFlags = self.flags.resolve(ctx.tenant_id, &plan_code).await?;
        if resolved.get(flag).copied().unwrap_or(false) {
            Ok(GateDecision::Granted(resolved))
        } else {
            tracing::debug!("feature {} blocked for tenant {}", flag, ctx.tenant_id);
            Ok(GateDecision::FeatureBlocked { flag: flag.into() })
        }
    }

    /// Require a permission for the studio role the user holds
    pub async fn require_permission(
        &self,
        user_id: UserId,
        permission: &str,
    ) -> StoreResult<GateDecision> {
        let ctx = match resolve_tenant_for_user(self.store.as_ref(), user_id).await? {
            Some(ctx) => ctx,
            None => return Ok(GateDecision::UnresolvedTenant),
        };

        let resolved: EffectivePermissions =
            self.permissions.resolve(ctx.tenant_id, ctx.role).await?;
        if resolved.get(permission).copied().unwrap_or(false) {
            Ok(GateDecision::Granted(resolved))
        } else {
            tracing::debug!(
                "permission {} denied for tenant {} role {:?}",
                permission,
                ctx.tenant_id,
                ctx.role
            );
            Ok(GateDecision::PermissionDenied {
                permission: permission.into(),
            })
        }
    }
}
