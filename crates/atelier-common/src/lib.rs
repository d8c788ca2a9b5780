//! Atelier Platform Common Types
//!
//! Shared domain model, configuration, and persistence abstraction for the
//! Atelier entitlement core.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ATELIER COMMON                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                       DOMAIN MODEL                              │   │
//! │  │  Catalog Definitions | Grants & Overrides | Plans | Subscriptions│   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────────────────┐  │
//! │  │   Config     │  │   Errors     │  │       Store Traits           │  │
//! │  │ grace period │  │  StoreError  │  │ Catalog | Grant | Subscription│  │
//! │  └──────────────┘  └──────────────┘  │ Usage | Directory            │  │
//! │                                      └──────────────────────────────┘  │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               IN-MEMORY STORE (tests & development)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod config;
pub mod error;
pub mod model;
pub mod store;

pub use config::EntitlementConfig;
pub use error::{StoreError, StoreResult};
pub use model::{StudioRole, TenantId, UserId};
pub use store::InMemoryStore;
