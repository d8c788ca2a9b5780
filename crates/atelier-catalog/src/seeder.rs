//! Idempotent catalog seeding

use crate::defaults::Catalog;
use atelier_common::error::StoreResult;
use atelier_common::store::CatalogStore;

/// Upsert every catalog entry into the store.
///
/// Safe to call repeatedly and concurrently: each row upsert is atomic, so
/// the end state after N concurrent calls is identical to one call. Codes
/// removed from the fixed lists are never purged.
pub async fn ensure_catalog<S>(store: &S, catalog: &Catalog) -> StoreResult<()>
where
    S: CatalogStore + ?Sized,
{
    for flag in catalog.flags() {
        store.upsert_feature(flag.clone()).await?;
    }
    for permission in catalog.permissions() {
        store.upsert_permission(permission.clone()).await?;
    }
    for grant in catalog.role_grants() {
        store.upsert_role_grant(grant).await?;
    }
    tracing::debug!(
        "catalog seeded: {} flags, {} permissions",
        catalog.flags().len(),
        catalog.permissions().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_common::model::StudioRole;
    use atelier_common::store::{CatalogStore, GrantStore, InMemoryStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_seed_populates_catalog() {
        let store = InMemoryStore::new();
        let catalog = Catalog::builtin();

        ensure_catalog(&store, &catalog).await.unwrap();

        let mut flags = store.list_flag_codes().await.unwrap();
        flags.sort();
        assert_eq!(flags.len(), 7);
        assert!(flags.contains(&"domains.custom".to_string()));
        assert_eq!(store.list_permission_codes().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_reseed_converges() {
        let store = InMemoryStore::new();
        let catalog = Catalog::builtin();

        ensure_catalog(&store, &catalog).await.unwrap();
        let first_flags = {
            let mut f = store.list_flag_codes().await.unwrap();
            f.sort();
            f
        };
        let first_grants = store
            .role_permission_grants(StudioRole::Staff)
            .await
            .unwrap()
            .len();

        ensure_catalog(&store, &catalog).await.unwrap();
        let mut second_flags = store.list_flag_codes().await.unwrap();
        second_flags.sort();

        assert_eq!(first_flags, second_flags);
        assert_eq!(
            store
                .role_permission_grants(StudioRole::Staff)
                .await
                .unwrap()
                .len(),
            first_grants
        );
    }

    #[tokio::test]
    async fn test_concurrent_seeds_converge() {
        let store = Arc::new(InMemoryStore::new());
        let catalog = Catalog::builtin();

        let a = ensure_catalog(store.as_ref(), &catalog);
        let b = ensure_catalog(store.as_ref(), &catalog);
        let c = ensure_catalog(store.as_ref(), &catalog);
        let (ra, rb, rc) = tokio::join!(a, b, c);
        ra.unwrap();
        rb.unwrap();
        rc.unwrap();

        assert_eq!(store.list_flag_codes().await.unwrap().len(), 7);
        for role in StudioRole::all() {
            assert_eq!(store.role_permission_grants(role).await.unwrap().len(), 6);
        }
    }

    #[tokio::test]
    async fn test_seeder_does_not_purge_unknown_codes() {
        let store = InMemoryStore::new();
        let catalog = Catalog::builtin();

        // A code that predates the current fixed list
        store
            .upsert_feature(atelier_common::model::FeatureDefinition {
                code: "legacy.widget".into(),
                name: "Legacy widget".into(),
                description: None,
            })
            .await
            .unwrap();

        ensure_catalog(&store, &catalog).await.unwrap();

        let flags = store.list_flag_codes().await.unwrap();
        assert!(flags.contains(&"legacy.widget".to_string()));
        assert_eq!(flags.len(), 8);
    }
}
