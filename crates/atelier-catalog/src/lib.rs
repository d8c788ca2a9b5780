//! Atelier Reference Catalogs
//!
//! The fixed, versioned set of flag, permission, and role-default
//! definitions, and the idempotent seeder that guarantees they exist in the
//! store before any resolution runs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CATALOG SEEDING                                   │
//! │                                                                         │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────────────────┐    │
//! │  │  Flag list   │   │  Perm list   │   │  Role matrix (exhaustive)│    │
//! │  └──────┬───────┘   └──────┬───────┘   └────────────┬─────────────┘    │
//! │         │                  │                        │                  │
//! │         └────────────► ensure_catalog ◄─────────────┘                  │
//! │                            │ upsert per row, idempotent                │
//! │                            ▼                                           │
//! │                      persistent store                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod defaults;
pub mod seeder;

pub use defaults::{builtin_plan_grants, builtin_plans, Catalog};
pub use seeder::ensure_catalog;
