//! Membership-only set delta.

use std::collections::HashSet;

use crate::delta::map::describe_bucket;
use crate::delta::CapacityHints;
use crate::errors::{RelmapError, Result};
use crate::model::{same_domain, InternDomain};

/// Delta between two key-set snapshots.
///
/// Sets have no value to change: an element is either still present, added,
/// or removed. Elements found on both sides are recorded once, in the final
/// domain's representation.
#[derive(Debug, Clone, PartialEq)]
pub struct SetDelta {
    added: Option<HashSet<String>>,
    removed: Option<HashSet<String>>,
    still: Option<HashSet<String>>,
}

impl SetDelta {
    /// Create a delta with the given per-bucket tracking flags
    pub fn new(record_added: bool, record_removed: bool, record_still: bool) -> Self {
        Self::with_capacity(record_added, record_removed, record_still, CapacityHints::default())
    }

    /// Create a delta with tracking flags and capacity hints
    ///
    /// The `changed` hint is ignored; sets have no changed bucket.
    pub fn with_capacity(
        record_added: bool,
        record_removed: bool,
        record_still: bool,
        hints: CapacityHints,
    ) -> Self {
        Self {
            added: record_added.then(|| HashSet::with_capacity(hints.added)),
            removed: record_removed.then(|| HashSet::with_capacity(hints.removed)),
            still: record_still.then(|| HashSet::with_capacity(hints.still)),
        }
    }

    /// Compute the delta between two same-domain snapshots.
    ///
    /// # Errors
    ///
    /// Returns `EmptyKey` if a snapshot contains an empty key.
    pub fn subtract(
        &mut self,
        final_set: &HashSet<String>,
        initial_set: &HashSet<String>,
    ) -> Result<()> {
        if final_set.is_empty() && initial_set.is_empty() {
            return Ok(());
        }
        if final_set.is_empty() {
            for key in initial_set {
                self.record_removed(key)?;
            }
            return Ok(());
        }
        if initial_set.is_empty() {
            for key in final_set {
                self.record_added(key)?;
            }
            return Ok(());
        }

        for key in final_set {
            if initial_set.contains(key) {
                self.record_still(key)?;
            } else {
                self.record_added(key)?;
            }
        }
        for key in initial_set {
            if !final_set.contains(key) {
                self.record_removed(key)?;
            }
        }

        Ok(())
    }

    /// Compute the delta between snapshots from two interning domains.
    ///
    /// Lookups are non-forcing; when both handles name the same domain,
    /// interning is skipped and raw equality is used.
    ///
    /// # Errors
    ///
    /// Returns `EmptyKey` if a snapshot contains an empty key.
    pub fn subtract_interned(
        &mut self,
        final_set: &HashSet<String>,
        final_domain: &dyn InternDomain,
        initial_set: &HashSet<String>,
        initial_domain: &dyn InternDomain,
    ) -> Result<()> {
        // The empty cases never touch the domains.
        if final_set.is_empty() || initial_set.is_empty() {
            return self.subtract(final_set, initial_set);
        }

        if same_domain(final_domain, initial_domain) {
            return self.subtract(final_set, initial_set);
        }

        for final_key in final_set {
            let present = initial_domain
                .lookup(final_key)
                .is_some_and(|initial_key| initial_set.contains(initial_key));
            if present {
                self.record_still(final_key)?;
            } else {
                self.record_added(final_key)?;
            }
        }
        for initial_key in initial_set {
            let present = final_domain
                .lookup(initial_key)
                .is_some_and(|final_key| final_set.contains(final_key));
            if !present {
                self.record_removed(initial_key)?;
            }
        }

        Ok(())
    }

    /// Record an element into the added bucket (no-op if not tracked)
    pub fn record_added(&mut self, key: &str) -> Result<()> {
        Self::record_into(&mut self.added, "added", key)
    }

    /// Record an element into the removed bucket (no-op if not tracked)
    pub fn record_removed(&mut self, key: &str) -> Result<()> {
        Self::record_into(&mut self.removed, "removed", key)
    }

    /// Record an element into the still bucket (no-op if not tracked)
    pub fn record_still(&mut self, key: &str) -> Result<()> {
        Self::record_into(&mut self.still, "still", key)
    }

    fn record_into(
        bucket: &mut Option<HashSet<String>>,
        bucket_name: &str,
        key: &str,
    ) -> Result<()> {
        if key.is_empty() {
            return Err(RelmapError::EmptyKey {
                bucket: bucket_name.to_string(),
            });
        }
        if let Some(set) = bucket {
            set.insert(key.to_string());
        }
        Ok(())
    }

    /// The added bucket; `None` whenever tracking was disabled
    pub fn added(&self) -> Option<&HashSet<String>> {
        self.added.as_ref()
    }

    /// The removed bucket; `None` whenever tracking was disabled
    pub fn removed(&self) -> Option<&HashSet<String>> {
        self.removed.as_ref()
    }

    /// The still bucket; `None` whenever tracking was disabled
    pub fn still(&self) -> Option<&HashSet<String>> {
        self.still.as_ref()
    }

    /// True if the added bucket has nothing to report (disabled or empty)
    pub fn is_null_added(&self) -> bool {
        self.added.as_ref().is_none_or(HashSet::is_empty)
    }

    /// True if the removed bucket has nothing to report (disabled or empty)
    pub fn is_null_removed(&self) -> bool {
        self.removed.as_ref().is_none_or(HashSet::is_empty)
    }

    /// True if the still bucket has nothing to report (disabled or empty)
    pub fn is_null_still(&self) -> bool {
        self.still.as_ref().is_none_or(HashSet::is_empty)
    }

    /// True if no additions or removals were reported
    pub fn is_unchanged(&self) -> bool {
        self.is_null_added() && self.is_null_removed()
    }

    /// Append short human-readable bucket summaries to `out`
    pub fn describe(&self, prefix: &str, out: &mut Vec<String>) {
        describe_bucket(prefix, "Added", self.added.as_ref().map(HashSet::len), out);
        describe_bucket(
            prefix,
            "Removed",
            self.removed.as_ref().map(HashSet::len),
            out,
        );
        describe_bucket(prefix, "Still", self.still.as_ref().map(HashSet::len), out);
    }
}
