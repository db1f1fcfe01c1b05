//! Snapshot data model: interning domains and the bidirectional relation map.

pub mod bidi;
pub mod intern;

pub use bidi::BidiMap;
pub use intern::{same_domain, DomainId, InternDomain, InternMap};
