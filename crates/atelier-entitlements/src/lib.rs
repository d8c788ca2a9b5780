//! Atelier Entitlement Core
//!
//! Layered access-control and entitlement resolution for (tenant, role)
//! pairs: effective feature flags, effective permissions, and the
//! subscription/quota gate in front of every bounded-resource creation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      ENTITLEMENT CORE                                   │
//! │                                                                         │
//! │   user ──► tenant context ──► (tenant_id, role, plan_code)             │
//! │                                                                         │
//! │  ┌──────────────────┐      ┌──────────────────┐                        │
//! │  │  Flag Resolver   │      │  Perm Resolver   │   precedence:          │
//! │  │ baseline(false)  │      │ role matrix      │   tenant override      │
//! │  │ → plan grants    │      │ → tenant         │   > plan/role default  │
//! │  │ → tenant         │      │   overrides      │   > catalog baseline   │
//! │  │   overrides      │      └──────────────────┘                        │
//! │  └──────────────────┘                                                  │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 ENTITLEMENT EVALUATOR                           │   │
//! │  │  subscription health (ACTIVE/TRIALING/PAST_DUE+grace)           │   │
//! │  │  → quota count vs plan limit per bounded resource               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Policy denials are data, never errors: resolvers return `false` map
//! entries and the evaluator returns tagged [`EntitlementDecision`]s.
//! Only infrastructure faults surface as [`atelier_common::StoreError`].

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod context;
pub mod flags;
pub mod gates;
pub mod permissions;
pub mod quota;
pub mod subscription;

pub use context::{resolve_tenant_for_user, TenantContext};
pub use flags::{EffectiveFlags, FlagResolver};
pub use gates::{AccessGate, GateDecision};
pub use permissions::{EffectivePermissions, PermissionResolver};
pub use quota::{DenialReason, EntitlementDecision, EntitlementEvaluator};
pub use subscription::{is_subscription_healthy, month_window};
