//! Atelier Usage & Audit Recording
//!
//! Best-effort event sink for usage metering and the audit trail. A failing
//! sink is logged and swallowed; it never aborts or alters the outcome of
//! the calling resolver or evaluator.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     USAGE / AUDIT RECORDING                             │
//! │                                                                         │
//! │   resolver / evaluator ──► AuditRecorder ──► AuditSink (store)          │
//! │                                │                                        │
//! │                                └── sink error → warn log, swallowed     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod events;
pub mod recorder;

pub use events::{AuditEntry, UsageEvent, UsageKind};
pub use recorder::{AuditRecorder, AuditSink, InMemoryAuditSink};
