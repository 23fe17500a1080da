//! Audit logging system for FAM
//!
//! Records every create, update and lock with before/after snapshots in an
//! append-only JSONL log.
//!
//! - `AuditEntry`: one operation on one entity.
//! - `AuditLogger`: appends entries to `audit.log` and reads them back.
//! - `generate_diff`: summarizes what changed between two snapshots.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
