//! Quota and subscription gates for bounded-resource creation

use crate::subscription::{is_subscription_healthy, month_window};
use atelier_common::config::EntitlementConfig;
use atelier_common::error::StoreResult;
use atelier_common::model::{Plan, TenantId};
use atelier_common::store::{SubscriptionStore, UsageStore};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Why a bounded-resource action was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenialReason {
    /// The tenant has no subscription (or its plan row is gone)
    NoSubscription,
    /// The subscription or its plan is not commercially usable
    InactiveSubscription,
    /// Current usage has reached the plan's limit
    LimitReached,
}

/// Outcome of an entitlement check
///
/// Policy denials are data, not errors; only infrastructure faults surface
/// as `StoreError`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntitlementDecision {
    /// The action may proceed
    Granted,
    /// The action is blocked, with a reason code and a readable message
    Denied {
        /// Machine-readable reason
        reason: DenialReason,
        /// Human-readable message for the upgrade/payment response
        message: String,
    },
}

impl EntitlementDecision {
    /// Whether the action may proceed
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    fn denied(reason: DenialReason, message: impl Into<String>) -> Self {
        Self::Denied {
            reason,
            message: message.into(),
        }
    }
}

enum PlanGate {
    Healthy(Plan),
    Denied(EntitlementDecision),
}

/// Gates bounded-resource mutations on subscription health and plan quota.
///
/// Checks are best-effort: two concurrent creations for the same tenant can
/// both observe a count below the limit and both proceed. The check is not
/// run inside the same transaction as the subsequent insert.
pub struct EntitlementEvaluator<S: ?Sized> {
    store: Arc<S>,
    config: EntitlementConfig,
}

impl<S> EntitlementEvaluator<S>
where
    S: SubscriptionStore + UsageStore + ?Sized,
{
    /// Create an evaluator over a store
    pub fn new(store: Arc<S>, config: EntitlementConfig) -> Self {
        Self { store, config }
    }

    /// May the tenant create another project?
    pub async fn can_create_project(
        &self,
        tenant_id: TenantId,
    ) -> StoreResult<EntitlementDecision> {
        let plan = match self.plan_gate(tenant_id).await? {
            PlanGate::Healthy(plan) => plan,
            PlanGate::Denied(decision) => return Ok(decision),
        };
        if let Some(limit) = plan.max_projects {
            let count = self.store.count_active_projects(tenant_id).await?;
            if count >= limit as u64 {
                return Ok(self.limit_reached(tenant_id, "projects", limit));
            }
        }
        Ok(EntitlementDecision::Granted)
    }

    /// May the tenant create another testimonial?
    pub async fn can_create_testimonial(
        &self,
        tenant_id: TenantId,
    ) -> StoreResult<EntitlementDecision> {
        let plan = match self.plan_gate(tenant_id).await? {
            PlanGate::Healthy(plan) => plan,
            PlanGate::Denied(decision) => return Ok(decision),
        };
        if let Some(limit) = plan.max_testimonials {
            let count = self.store.count_testimonials(tenant_id).await?;
            if count >= limit as u64 {
                return Ok(self.limit_reached(tenant_id, "testimonials", limit));
            }
        }
        Ok(EntitlementDecision::Granted)
    }

    /// May the tenant receive another quote request this calendar month?
    pub async fn can_receive_quote_request(
        &self,
        tenant_id: TenantId,
    ) -> StoreResult<EntitlementDecision> {
        let plan = match self.plan_gate(tenant_id).await? {
            PlanGate::Healthy(plan) => plan,
            PlanGate::Denied(decision) => return Ok(decision),
        };
        if let Some(limit) = plan.max_monthly_requests {
            let (start, end) = month_window(Utc::now());
            let count = self
                .store
                .count_quote_requests_between(tenant_id, start, end)
                .await?;
            if count >= limit as u64 {
                return Ok(self.limit_reached(tenant_id, "monthly quote requests", limit));
            }
        }
        Ok(EntitlementDecision::Granted)
    }

    /// May the tenant add another team member?
    ///
    /// Seats count the owner plus every member row.
    pub async fn can_add_member(&self, tenant_id: TenantId) -> StoreResult<EntitlementDecision> {
        let plan = match self.plan_gate(tenant_id).await? {
            PlanGate::Healthy(plan) => plan,
            PlanGate::Denied(decision) => return Ok(decision),
        };
        if let Some(limit) = plan.max_users {
            let seats = 1 + self.store.count_members(tenant_id).await?;
            if seats >= limit as u64 {
                return Ok(self.limit_reached(tenant_id, "team seats", limit));
            }
        }
        Ok(EntitlementDecision::Granted)
    }

    /// Shared gate: subscription present, plan row active, health machine ok
    async fn plan_gate(&self, tenant_id: TenantId) -> StoreResult<PlanGate> {
        let (sub, plan) = match self.store.subscription_with_plan(tenant_id).await? {
            Some(pair) => pair,
            None => {
                return Ok(PlanGate::Denied(EntitlementDecision::denied(
                    DenialReason::NoSubscription,
                    "No subscription found for this studio.",
                )))
            }
        };
        if !plan.active {
            return Ok(PlanGate::Denied(EntitlementDecision::denied(
                DenialReason::InactiveSubscription,
                "The plan attached to this subscription is inactive.",
            )));
        }
        if !is_subscription_healthy(&sub, Utc::now(), self.config.grace_period()) {
            return Ok(PlanGate::Denied(EntitlementDecision::denied(
                DenialReason::InactiveSubscription,
                "Subscription is inactive. Settle the outstanding payment to continue.",
            )));
        }
        Ok(PlanGate::Healthy(plan))
    }

    fn limit_reached(&self, tenant_id: TenantId, resource: &str, limit: u32) -> EntitlementDecision {
        tracing::debug!("tenant {} hit the {} limit of {}", tenant_id, resource, limit);
        EntitlementDecision::denied(
            DenialReason::LimitReached,
            format!("Plan limit of {} {} reached. Upgrade to continue.", limit, resource),
        )
    }
}
