//! Bidirectional holder/held relation map
//!
//! One holder maps to a set of held elements, and every held element can be
//! queried back to its holders. Both directions are maintained here, on
//! every [`record`]; the delta engine only ever reads the forward view.
//!
//! Collections use `BTreeMap`/`BTreeSet` for deterministic iteration and
//! serialization.
//!
//! [`record`]: BidiMap::record

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::errors::{RelmapError, Result};

/// A many-to-many relation between holder keys and held keys.
///
/// Tagged with the names of the holder and held interning domains; the tags
/// are diagnostic only and carry no interning behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidiMap {
    /// Name of the domain holder keys belong to
    holder_tag: String,
    /// Name of the domain held keys belong to
    held_tag: String,
    /// holder -> set of held
    forward: BTreeMap<String, BTreeSet<String>>,
    /// held -> set of holders
    reverse: BTreeMap<String, BTreeSet<String>>,
}

impl BidiMap {
    /// Create an empty relation map tagged with the given domain names
    pub fn new(holder_tag: impl Into<String>, held_tag: impl Into<String>) -> Self {
        Self {
            holder_tag: holder_tag.into(),
            held_tag: held_tag.into(),
            forward: BTreeMap::new(),
            reverse: BTreeMap::new(),
        }
    }

    /// Name of the holder domain
    pub fn holder_tag(&self) -> &str {
        &self.holder_tag
    }

    /// Name of the held domain
    pub fn held_tag(&self) -> &str {
        &self.held_tag
    }

    /// Record a (holder, held) pair, maintaining both directions.
    ///
    /// Returns `false` if the pair was already present.
    ///
    /// # Errors
    ///
    /// Returns `EmptyHolder`/`EmptyHeld` if either key is empty.
    pub fn record(&mut self, holder: &str, held: &str) -> Result<bool> {
        if holder.is_empty() {
            return Err(RelmapError::EmptyHolder {
                holder_tag: self.holder_tag.clone(),
                held_tag: self.held_tag.clone(),
            });
        }
        if held.is_empty() {
            return Err(RelmapError::EmptyHeld {
                holder_tag: self.holder_tag.clone(),
                held_tag: self.held_tag.clone(),
                holder: holder.to_string(),
            });
        }

        let newly_added = self
            .forward
            .entry(holder.to_string())
            .or_default()
            .insert(held.to_string());
        if newly_added {
            self.reverse
                .entry(held.to_string())
                .or_default()
                .insert(holder.to_string());
        }
        Ok(newly_added)
    }

    /// Iterate over all holder keys
    pub fn holders(&self) -> impl Iterator<Item = &str> {
        self.forward.keys().map(String::as_str)
    }

    /// The held elements recorded under `holder`, if any
    pub fn held_of(&self, holder: &str) -> Option<&BTreeSet<String>> {
        self.forward.get(holder)
    }

    /// The holders recorded for `held`, if any
    pub fn holders_of(&self, held: &str) -> Option<&BTreeSet<String>> {
        self.reverse.get(held)
    }

    /// True if the (holder, held) pair is present
    pub fn contains(&self, holder: &str, held: &str) -> bool {
        self.forward
            .get(holder)
            .is_some_and(|set| set.contains(held))
    }

    /// True if `holder` has at least one held element
    pub fn has_holder(&self, holder: &str) -> bool {
        self.forward
            .get(holder)
            .is_some_and(|set| !set.is_empty())
    }

    /// Number of holder keys
    pub fn holder_count(&self) -> usize {
        self.forward.len()
    }

    /// Total number of (holder, held) pairs
    pub fn pair_count(&self) -> usize {
        self.forward.values().map(BTreeSet::len).sum()
    }

    /// True if no pairs are recorded
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}
