//! Snapshot delta engine.
//!
//! Compares a "final" snapshot against an "initial" snapshot of the same
//! structure kind and classifies every entry as added, removed, changed,
//! or still present.
//!
//! ## Entry points
//!
//! ```ignore
//! use relmap_core::delta::MapDelta;
//!
//! let mut delta = MapDelta::new(true, true, true, true);
//! delta.subtract(&final_map, &initial_map)?;
//! let summary = relmap_core::delta::summary::render_map_summary(&delta);
//! ```
//!
//! ## Guarantees
//!
//! - **Single classification**: an entry appears in at most one of
//!   added/removed/changed/still for a given comparison.
//! - **Domain orientation**: added entries are keyed in the final domain,
//!   removed entries in the initial domain; changed entries are keyed by the
//!   final key and record the (final, initial) value pair. The final-domain
//!   bias of the changed bucket is deliberate and documented.
//! - **Optional tracking**: each bucket can be disabled at construction;
//!   disabled buckets are never allocated and always report as null.
//! - **Non-forcing interning**: cross-domain comparisons translate keys via
//!   lookup only; a failed lookup means "domain exclusive", never an error,
//!   and neither domain is ever mutated.

pub mod bidi;
pub mod map;
pub mod set;
pub mod summary;
pub mod values;

pub use bidi::{BidiMapDelta, DomainPair};
pub use map::{MapDelta, ValuePair};
pub use set::SetDelta;
pub use values::{subtract_maps, MapValuesDelta, ValueDelta};

/// Per-bucket initial-capacity hints for the map and set deltas.
///
/// Purely advisory: they pre-size the bucket collections to reduce
/// reallocation during large scans. The `changed` hint is ignored by
/// [`SetDelta`], which has no changed bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapacityHints {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    pub still: usize,
}
