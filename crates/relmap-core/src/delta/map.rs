//! Scalar key/value map delta.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::delta::CapacityHints;
use crate::errors::{RelmapError, Result};
use crate::model::{same_domain, InternDomain};

/// The (final, initial) value pair recorded for a changed key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuePair {
    /// Value in the final snapshot
    pub final_value: String,
    /// Value in the initial snapshot
    pub initial_value: String,
}

/// Delta between two key/value map snapshots.
///
/// Buckets:
///
/// - `added` — keys in final but not initial (final domain)
/// - `removed` — keys in initial but not final (initial domain)
/// - `changed` — keys in both with differing values, keyed by the final key
///   and recording the (final, initial) value pair. Deliberately biased
///   toward the final domain; a known limitation, not a defect to repair.
/// - `still` — keys in both with equal values, keyed by the final key
///
/// Each bucket is independently optional: a disabled bucket is never
/// allocated and its accessor returns `None` even when entries for it
/// logically occurred.
///
/// By default, keys present only in the initial snapshot are folded into
/// `added` during pass 2, carrying their initial-domain key and value. This
/// replicates long-standing upstream behavior that disagrees with the
/// bidirectional-map delta's handling of the symmetric case; see
/// [`route_initial_only_to_removed`] to opt into recording them as `removed`.
///
/// [`route_initial_only_to_removed`]: MapDelta::route_initial_only_to_removed
#[derive(Debug, Clone, PartialEq)]
pub struct MapDelta {
    added: Option<HashMap<String, String>>,
    removed: Option<HashMap<String, String>>,
    changed: Option<HashMap<String, ValuePair>>,
    still: Option<HashMap<String, String>>,
    initial_only_to_removed: bool,
}

impl MapDelta {
    /// Create a delta with the given per-bucket tracking flags
    pub fn new(
        record_added: bool,
        record_removed: bool,
        record_changed: bool,
        record_still: bool,
    ) -> Self {
        Self::with_capacity(
            record_added,
            record_removed,
            record_changed,
            record_still,
            CapacityHints::default(),
        )
    }

    /// Create a delta with tracking flags and per-bucket capacity hints
    pub fn with_capacity(
        record_added: bool,
        record_removed: bool,
        record_changed: bool,
        record_still: bool,
        hints: CapacityHints,
    ) -> Self {
        Self {
            added: record_added.then(|| HashMap::with_capacity(hints.added)),
            removed: record_removed.then(|| HashMap::with_capacity(hints.removed)),
            changed: record_changed.then(|| HashMap::with_capacity(hints.changed)),
            still: record_still.then(|| HashMap::with_capacity(hints.still)),
            initial_only_to_removed: false,
        }
    }

    /// Route keys found only in the initial snapshot into `removed` instead
    /// of the default fold into `added`.
    ///
    /// Off by default to preserve the legacy classification; see the type
    /// docs and DESIGN.md.
    pub fn route_initial_only_to_removed(&mut self, enabled: bool) {
        self.initial_only_to_removed = enabled;
    }

    /// Compute the delta between two same-domain snapshots.
    ///
    /// Must be called at most once per delta; buckets accumulate across
    /// calls otherwise.
    ///
    /// # Errors
    ///
    /// Returns `EmptyKey` if a snapshot contains an empty key.
    pub fn subtract(
        &mut self,
        final_map: &HashMap<String, String>,
        initial_map: &HashMap<String, String>,
    ) -> Result<()> {
        if final_map.is_empty() && initial_map.is_empty() {
            return Ok(());
        }
        if final_map.is_empty() {
            for (key, value) in initial_map {
                self.record_removed(key, value)?;
            }
            return Ok(());
        }
        if initial_map.is_empty() {
            for (key, value) in final_map {
                self.record_added(key, value)?;
            }
            return Ok(());
        }

        // Pass 1: final against initial
        for (key, final_value) in final_map {
            match initial_map.get(key) {
                None => self.record_added(key, final_value)?,
                Some(initial_value) if final_value != initial_value => {
                    self.record_changed(key, final_value, initial_value)?;
                }
                Some(_) => self.record_still(key, final_value)?,
            }
        }

        // Pass 2: initial keys unmatched in final. Matched keys were fully
        // classified in pass 1; re-recording a changed entry here would
        // produce a duplicate with the opposite bias.
        for (key, initial_value) in initial_map {
            if !final_map.contains_key(key) {
                self.record_initial_only(key, initial_value)?;
            }
        }

        Ok(())
    }

    /// Compute the delta between snapshots from two interning domains.
    ///
    /// Each lookup key is translated through the opposite domain without
    /// forcing; a failed translation means the key does not exist in that
    /// domain. When both handles name the same domain, interning is skipped
    /// entirely and raw key equality is used.
    ///
    /// # Errors
    ///
    /// Returns `EmptyKey` if a snapshot contains an empty key.
    pub fn subtract_interned(
        &mut self,
        final_map: &HashMap<String, String>,
        final_domain: &dyn InternDomain,
        initial_map: &HashMap<String, String>,
        initial_domain: &dyn InternDomain,
    ) -> Result<()> {
        // The empty cases never touch the domains.
        if final_map.is_empty() || initial_map.is_empty() {
            return self.subtract(final_map, initial_map);
        }

        if same_domain(final_domain, initial_domain) {
            return self.subtract(final_map, initial_map);
        }

        // Pass 1: final against initial, translating into the initial domain
        for (final_key, final_value) in final_map {
            let initial_entry = initial_domain
                .lookup(final_key)
                .and_then(|initial_key| initial_map.get(initial_key));
            match initial_entry {
                None => self.record_added(final_key, final_value)?,
                Some(initial_value) if final_value != initial_value => {
                    self.record_changed(final_key, final_value, initial_value)?;
                }
                Some(_) => self.record_still(final_key, final_value)?,
            }
        }

        // Pass 2: initial keys unmatched in final
        for (initial_key, initial_value) in initial_map {
            let matched = final_domain
                .lookup(initial_key)
                .is_some_and(|final_key| final_map.contains_key(final_key));
            if !matched {
                self.record_initial_only(initial_key, initial_value)?;
            }
        }

        Ok(())
    }

    fn record_initial_only(&mut self, key: &str, value: &str) -> Result<()> {
        if self.initial_only_to_removed {
            self.record_removed(key, value)
        } else {
            self.record_added(key, value)
        }
    }

    /// Record an entry into the added bucket (no-op if not tracked)
    pub fn record_added(&mut self, key: &str, value: &str) -> Result<()> {
        Self::record_into(&mut self.added, "added", key, value)
    }

    /// Record an entry into the removed bucket (no-op if not tracked)
    pub fn record_removed(&mut self, key: &str, value: &str) -> Result<()> {
        Self::record_into(&mut self.removed, "removed", key, value)
    }

    /// Record an entry into the still bucket (no-op if not tracked)
    pub fn record_still(&mut self, key: &str, value: &str) -> Result<()> {
        Self::record_into(&mut self.still, "still", key, value)
    }

    /// Record a value change (no-op if the changed bucket is not tracked)
    pub fn record_changed(
        &mut self,
        key: &str,
        final_value: &str,
        initial_value: &str,
    ) -> Result<()> {
        if key.is_empty() {
            return Err(RelmapError::EmptyKey {
                bucket: "changed".to_string(),
            });
        }
        if let Some(changed) = &mut self.changed {
            changed.insert(
                key.to_string(),
                ValuePair {
                    final_value: final_value.to_string(),
                    initial_value: initial_value.to_string(),
                },
            );
        }
        Ok(())
    }

    fn record_into(
        bucket: &mut Option<HashMap<String, String>>,
        bucket_name: &str,
        key: &str,
        value: &str,
    ) -> Result<()> {
        if key.is_empty() {
            return Err(RelmapError::EmptyKey {
                bucket: bucket_name.to_string(),
            });
        }
        if let Some(map) = bucket {
            map.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    /// The added bucket; `None` whenever tracking was disabled
    pub fn added(&self) -> Option<&HashMap<String, String>> {
        self.added.as_ref()
    }

    /// The removed bucket; `None` whenever tracking was disabled
    pub fn removed(&self) -> Option<&HashMap<String, String>> {
        self.removed.as_ref()
    }

    /// The changed bucket; `None` whenever tracking was disabled
    pub fn changed(&self) -> Option<&HashMap<String, ValuePair>> {
        self.changed.as_ref()
    }

    /// The still bucket; `None` whenever tracking was disabled
    pub fn still(&self) -> Option<&HashMap<String, String>> {
        self.still.as_ref()
    }

    /// True if the added bucket has nothing to report (disabled or empty)
    pub fn is_null_added(&self) -> bool {
        self.added.as_ref().is_none_or(HashMap::is_empty)
    }

    /// True if the removed bucket has nothing to report (disabled or empty)
    pub fn is_null_removed(&self) -> bool {
        self.removed.as_ref().is_none_or(HashMap::is_empty)
    }

    /// True if the changed bucket has nothing to report (disabled or empty)
    pub fn is_null_changed(&self) -> bool {
        self.changed.as_ref().is_none_or(HashMap::is_empty)
    }

    /// True if the still bucket has nothing to report (disabled or empty)
    pub fn is_null_still(&self) -> bool {
        self.still.as_ref().is_none_or(HashMap::is_empty)
    }

    /// True if no additions, removals, or changes were reported
    pub fn is_unchanged(&self) -> bool {
        self.is_null_added() && self.is_null_removed() && self.is_null_changed()
    }

    /// Append short human-readable bucket summaries to `out`
    pub fn describe(&self, prefix: &str, out: &mut Vec<String>) {
        describe_bucket(prefix, "Added", self.added.as_ref().map(HashMap::len), out);
        describe_bucket(
            prefix,
            "Removed",
            self.removed.as_ref().map(HashMap::len),
            out,
        );
        describe_bucket(
            prefix,
            "Changed",
            self.changed.as_ref().map(HashMap::len),
            out,
        );
        describe_bucket(prefix, "Still", self.still.as_ref().map(HashMap::len), out);
    }
}

/// Shared `describe` line formatting for all delta kinds.
pub(crate) fn describe_bucket(
    prefix: &str,
    label: &str,
    len: Option<usize>,
    out: &mut Vec<String>,
) {
    match len {
        Some(n) => out.push(format!("{} {} [ {} ]", prefix, label, n)),
        None => out.push(format!("{} {} [ not tracked ]", prefix, label)),
    }
}
