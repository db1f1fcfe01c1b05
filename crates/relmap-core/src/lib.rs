//! Relmap Core - relational-mapping delta engine
//!
//! This crate computes structural differences between two snapshots of a
//! relational mapping, classifying every entry as added, removed, changed,
//! or still present. It provides:
//!
//! - Interning domains (`InternMap`) with non-forcing lookup semantics
//! - A bidirectional holder/held relation map (`BidiMap`)
//! - Delta engines for bidirectional maps, scalar maps, and sets
//! - Array-valued delta utilities for `key -> [values]` maps
//! - A human-readable summary renderer for review output
//!
//! Snapshots being compared may share an interning domain (fast path, raw
//! key equality) or live in different domains, in which case keys are
//! translated through non-forcing lookups before any equality test.

pub mod delta;
pub mod errors;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use delta::{BidiMapDelta, CapacityHints, DomainPair, MapDelta, SetDelta, ValueDelta};
pub use errors::{RelmapError, Result, RmError, RmErrorKind};
pub use model::{BidiMap, DomainId, InternDomain, InternMap};
