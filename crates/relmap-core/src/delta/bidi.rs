//! Bidirectional relation map delta.

use crate::delta::map::describe_bucket;
use crate::errors::{RelmapError, Result};
use crate::model::{same_domain, BidiMap, InternDomain};

/// The holder and held domain handles for one side of a comparison.
#[derive(Clone, Copy)]
pub struct DomainPair<'a> {
    pub holders: &'a dyn InternDomain,
    pub held: &'a dyn InternDomain,
}

impl<'a> DomainPair<'a> {
    pub fn new(holders: &'a dyn InternDomain, held: &'a dyn InternDomain) -> Self {
        Self { holders, held }
    }

    fn tag(&self) -> String {
        format!("{}:{}", self.holders.name(), self.held.name())
    }
}

/// Delta between two bidirectional relation-map snapshots.
///
/// There is no changed bucket: a (holder, held) pair is either still
/// present, added, or removed. Added and still pairs are keyed in the final
/// domain, removed pairs in the initial domain. Still pairs are recorded
/// exactly once, during the pass over the final snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct BidiMapDelta {
    holder_tag: String,
    held_tag: String,
    added: Option<BidiMap>,
    removed: Option<BidiMap>,
    still: Option<BidiMap>,
}

impl BidiMapDelta {
    /// Create a delta with the given per-bucket tracking flags.
    ///
    /// The domain handles are used only to tag the bucket maps for
    /// diagnostics; the domains consulted during interning are the ones
    /// passed to [`subtract_interned`].
    ///
    /// [`subtract_interned`]: BidiMapDelta::subtract_interned
    pub fn new(
        holder_domain: &dyn InternDomain,
        held_domain: &dyn InternDomain,
        record_added: bool,
        record_removed: bool,
        record_still: bool,
    ) -> Self {
        let holder_tag = holder_domain.name().to_string();
        let held_tag = held_domain.name().to_string();
        let bucket = |enabled: bool| enabled.then(|| BidiMap::new(&holder_tag, &held_tag));
        Self {
            added: bucket(record_added),
            removed: bucket(record_removed),
            still: bucket(record_still),
            holder_tag,
            held_tag,
        }
    }

    /// Create a delta tracking all three buckets
    pub fn new_all(holder_domain: &dyn InternDomain, held_domain: &dyn InternDomain) -> Self {
        Self::new(holder_domain, held_domain, true, true, true)
    }

    /// Compute the delta between two same-domain snapshots using raw key
    /// equality.
    ///
    /// # Errors
    ///
    /// Returns `EmptyHolder`/`EmptyHeld` if a snapshot contains empty keys.
    pub fn subtract(&mut self, final_map: &BidiMap, initial_map: &BidiMap) -> Result<()> {
        // Pass 1 over final holders: added and still
        for holder in final_map.holders() {
            let Some(final_held) = final_map.held_of(holder) else {
                continue;
            };
            match initial_map.held_of(holder).filter(|set| !set.is_empty()) {
                None => {
                    for held in final_held {
                        self.record_added(holder, held)?;
                    }
                }
                Some(initial_held) => {
                    for held in final_held {
                        if initial_held.contains(held) {
                            self.record_still(holder, held)?;
                        } else {
                            self.record_added(holder, held)?;
                        }
                    }
                }
            }
        }

        // Pass 2 over initial holders: removed only. Pairs present on both
        // sides were recorded as still during pass 1.
        for holder in initial_map.holders() {
            let Some(initial_held) = initial_map.held_of(holder) else {
                continue;
            };
            match final_map.held_of(holder).filter(|set| !set.is_empty()) {
                None => {
                    for held in initial_held {
                        self.record_removed(holder, held)?;
                    }
                }
                Some(final_held) => {
                    for held in initial_held {
                        if !final_held.contains(held) {
                            self.record_removed(holder, held)?;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Compute the delta between snapshots from two domain pairs.
    ///
    /// Holder and held keys are translated independently through the
    /// opposite side's domains, without forcing. Components whose two sides
    /// share a domain skip interning and use raw equality; when both
    /// components match, this delegates to [`subtract`].
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` — the final-side domains do not match the domains
    ///   this delta was constructed for
    /// - `EmptyHolder`/`EmptyHeld` — a snapshot contains empty keys
    ///
    /// [`subtract`]: BidiMapDelta::subtract
    pub fn subtract_interned(
        &mut self,
        final_map: &BidiMap,
        final_domains: DomainPair<'_>,
        initial_map: &BidiMap,
        initial_domains: DomainPair<'_>,
    ) -> Result<()> {
        if final_domains.holders.name() != self.holder_tag
            || final_domains.held.name() != self.held_tag
        {
            return Err(RelmapError::DomainMismatch {
                expected: format!("{}:{}", self.holder_tag, self.held_tag),
                actual: final_domains.tag(),
            });
        }

        let same_holders = same_domain(final_domains.holders, initial_domains.holders);
        let same_held = same_domain(final_domains.held, initial_domains.held);
        if same_holders && same_held {
            return self.subtract(final_map, initial_map);
        }

        // Pass 1 over final holders: added and still
        for holder in final_map.holders() {
            let Some(final_held) = final_map.held_of(holder) else {
                continue;
            };
            let initial_holder = if same_holders {
                Some(holder)
            } else {
                initial_domains.holders.lookup(holder)
            };
            let initial_held = initial_holder
                .and_then(|h| initial_map.held_of(h))
                .filter(|set| !set.is_empty());
            match initial_held {
                None => {
                    for held in final_held {
                        self.record_added(holder, held)?;
                    }
                }
                Some(initial_held) => {
                    for held in final_held {
                        let present = if same_held {
                            initial_held.contains(held)
                        } else {
                            initial_domains
                                .held
                                .lookup(held)
                                .is_some_and(|h| initial_held.contains(h))
                        };
                        if present {
                            self.record_still(holder, held)?;
                        } else {
                            self.record_added(holder, held)?;
                        }
                    }
                }
            }
        }

        // Pass 2 over initial holders: removed only
        for holder in initial_map.holders() {
            let Some(initial_held) = initial_map.held_of(holder) else {
                continue;
            };
            let final_holder = if same_holders {
                Some(holder)
            } else {
                final_domains.holders.lookup(holder)
            };
            let final_held = final_holder
                .and_then(|h| final_map.held_of(h))
                .filter(|set| !set.is_empty());
            match final_held {
                None => {
                    for held in initial_held {
                        self.record_removed(holder, held)?;
                    }
                }
                Some(final_held) => {
                    for held in initial_held {
                        let present = if same_held {
                            final_held.contains(held)
                        } else {
                            final_domains
                                .held
                                .lookup(held)
                                .is_some_and(|h| final_held.contains(h))
                        };
                        if !present {
                            self.record_removed(holder, held)?;
                        }
                        // Present pairs were recorded as still in pass 1.
                    }
                }
            }
        }

        Ok(())
    }

    /// Record a pair into the added bucket (no-op if not tracked)
    pub fn record_added(&mut self, holder: &str, held: &str) -> Result<bool> {
        match &mut self.added {
            Some(map) => map.record(holder, held),
            None => Ok(false),
        }
    }

    /// Record a pair into the removed bucket (no-op if not tracked)
    pub fn record_removed(&mut self, holder: &str, held: &str) -> Result<bool> {
        match &mut self.removed {
            Some(map) => map.record(holder, held),
            None => Ok(false),
        }
    }

    /// Record a pair into the still bucket (no-op if not tracked)
    pub fn record_still(&mut self, holder: &str, held: &str) -> Result<bool> {
        match &mut self.still {
            Some(map) => map.record(holder, held),
            None => Ok(false),
        }
    }

    /// The added bucket; `None` whenever tracking was disabled
    pub fn added(&self) -> Option<&BidiMap> {
        self.added.as_ref()
    }

    /// The removed bucket; `None` whenever tracking was disabled
    pub fn removed(&self) -> Option<&BidiMap> {
        self.removed.as_ref()
    }

    /// The still bucket; `None` whenever tracking was disabled
    pub fn still(&self) -> Option<&BidiMap> {
        self.still.as_ref()
    }

    /// True if the added bucket has nothing to report (disabled or empty)
    pub fn is_null_added(&self) -> bool {
        self.added.as_ref().is_none_or(BidiMap::is_empty)
    }

    /// True if the removed bucket has nothing to report (disabled or empty)
    pub fn is_null_removed(&self) -> bool {
        self.removed.as_ref().is_none_or(BidiMap::is_empty)
    }

    /// True if the still bucket has nothing to report (disabled or empty)
    pub fn is_null_still(&self) -> bool {
        self.still.as_ref().is_none_or(BidiMap::is_empty)
    }

    /// True if no additions or removals were reported
    pub fn is_unchanged(&self) -> bool {
        self.is_null_added() && self.is_null_removed()
    }

    /// Append short human-readable bucket summaries to `out`
    pub fn describe(&self, prefix: &str, out: &mut Vec<String>) {
        describe_bucket(
            prefix,
            "Added",
            self.added.as_ref().map(BidiMap::pair_count),
            out,
        );
        describe_bucket(
            prefix,
            "Removed",
            self.removed.as_ref().map(BidiMap::pair_count),
            out,
        );
        describe_bucket(
            prefix,
            "Still",
            self.still.as_ref().map(BidiMap::pair_count),
            out,
        );
    }
}
