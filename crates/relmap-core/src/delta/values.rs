//! Array-valued delta utilities.
//!
//! Supports maps whose values are arrays of strings (one key mapping to
//! several flag values). A single transient [`ValueDelta`] accumulator is
//! reused across the keys of a map scan and drained after each key, instead
//! of allocating a fresh accumulator per key.

use std::collections::{BTreeMap, HashSet};
use std::mem;

use serde::{Deserialize, Serialize};

/// Transient accumulator for the delta between two value arrays.
///
/// Populate with [`subtract`], then drain each bucket once with the
/// `consume_*` methods before the next [`subtract`] call.
///
/// [`subtract`]: ValueDelta::subtract
#[derive(Debug, Default)]
pub struct ValueDelta {
    added: Vec<String>,
    removed: Vec<String>,
    still: Vec<String>,
}

impl ValueDelta {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify the two value arrays, resetting any prior state.
    ///
    /// Added and still values keep final-array order; removed values keep
    /// initial-array order.
    pub fn subtract(&mut self, final_values: &[String], initial_values: &[String]) {
        self.added.clear();
        self.removed.clear();
        self.still.clear();

        let initial_lookup: HashSet<&str> = initial_values.iter().map(String::as_str).collect();
        let final_lookup: HashSet<&str> = final_values.iter().map(String::as_str).collect();

        for value in final_values {
            if initial_lookup.contains(value.as_str()) {
                self.still.push(value.clone());
            } else {
                self.added.push(value.clone());
            }
        }
        for value in initial_values {
            if !final_lookup.contains(value.as_str()) {
                self.removed.push(value.clone());
            }
        }
    }

    /// Values present only in the final array
    pub fn added(&self) -> &[String] {
        &self.added
    }

    /// Values present only in the initial array
    pub fn removed(&self) -> &[String] {
        &self.removed
    }

    /// Values present in both arrays
    pub fn still(&self) -> &[String] {
        &self.still
    }

    /// True if no values were classified into any bucket
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.still.is_empty()
    }

    /// Drain and return the added values
    pub fn consume_added(&mut self) -> Vec<String> {
        mem::take(&mut self.added)
    }

    /// Drain and return the removed values
    pub fn consume_removed(&mut self) -> Vec<String> {
        mem::take(&mut self.removed)
    }

    /// Drain and return the still values.
    ///
    /// TODO: this drains `removed`, not `still`; kept as-is until the
    /// downstream cache consumers confirm they can absorb the corrected
    /// draining. Tracked in DESIGN.md.
    pub fn consume_still(&mut self) -> Vec<String> {
        mem::take(&mut self.removed)
    }
}

/// Per-key delta between two `key -> [values]` maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapValuesDelta {
    /// Values added per key (whole array for keys only in final)
    pub added: BTreeMap<String, Vec<String>>,
    /// Values removed per key (whole array for keys only in initial)
    pub removed: BTreeMap<String, Vec<String>>,
    /// Values present on both sides per key
    pub still: BTreeMap<String, Vec<String>>,
}

impl MapValuesDelta {
    /// True if no per-key additions or removals were found
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Append short human-readable bucket summaries to `out`
    pub fn describe(&self, prefix: &str, out: &mut Vec<String>) {
        out.push(format!("{} Added [ {} ]", prefix, self.added.len()));
        out.push(format!("{} Removed [ {} ]", prefix, self.removed.len()));
        out.push(format!("{} Still [ {} ]", prefix, self.still.len()));
    }
}

/// Diff two `key -> [values]` maps, producing per-key added/removed/still
/// arrays.
///
/// Keys present on only one side contribute their whole value array to
/// `added` or `removed`. Empty per-key arrays are not recorded. A single
/// [`ValueDelta`] accumulator is reused across keys.
pub fn subtract_maps(
    final_map: &BTreeMap<String, Vec<String>>,
    initial_map: &BTreeMap<String, Vec<String>>,
) -> MapValuesDelta {
    let mut accumulator = ValueDelta::new();
    let mut delta = MapValuesDelta::default();

    for (key, final_values) in final_map {
        match initial_map.get(key) {
            None => {
                if !final_values.is_empty() {
                    delta.added.insert(key.clone(), final_values.clone());
                }
            }
            Some(initial_values) => {
                accumulator.subtract(final_values, initial_values);
                let added = accumulator.consume_added();
                if !added.is_empty() {
                    delta.added.insert(key.clone(), added);
                }
                let removed = accumulator.consume_removed();
                if !removed.is_empty() {
                    delta.removed.insert(key.clone(), removed);
                }
                let still = accumulator.consume_still();
                if !still.is_empty() {
                    delta.still.insert(key.clone(), still);
                }
            }
        }
    }

    for (key, initial_values) in initial_map {
        if !final_map.contains_key(key) && !initial_values.is_empty() {
            delta.removed.insert(key.clone(), initial_values.clone());
        }
    }

    delta
}
