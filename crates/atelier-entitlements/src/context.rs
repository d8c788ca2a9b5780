//! Tenant context resolution
//!
//! Maps an authenticated user to the studio they act for. The active studio
//! the user owns wins; otherwise the user's earliest active membership.

use atelier_common::error::StoreResult;
use atelier_common::model::{StudioRole, TenantId, UserId};
use atelier_common::store::DirectoryStore;
use serde::{Deserialize, Serialize};

/// The (tenant, role) pair resolved for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    /// Studio the user acts for
    pub tenant_id: TenantId,
    /// Role the user holds there
    pub role: StudioRole,
}

/// Resolve the studio a user acts for, if any.
///
/// Ownership takes precedence over membership. An inactive studio never
/// yields a context, even when the user is its owner or oldest member.
pub async fn resolve_tenant_for_user<S>(
    store: &S,
    user_id: UserId,
) -> StoreResult<Option<TenantContext>>
where
    S: DirectoryStore + ?Sized,
{
    if let Some(studio) = store.owned_studio(user_id).await? {
        if studio.active {
            return Ok(Some(TenantContext {
                tenant_id: studio.id,
                role: StudioRole::Owner,
            }));
        }
    }

    if let Some(membership) = store.earliest_membership(user_id).await? {
        if let Some(studio) = store.studio(membership.studio_id).await? {
            if studio.active {
                return Ok(Some(TenantContext {
                    tenant_id: membership.studio_id,
                    role: membership.role,
                }));
            }
        }
    }

    Ok(None)
}
