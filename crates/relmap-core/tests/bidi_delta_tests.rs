//! Bidirectional relation-map delta tests: pair classification, bucket
//! keying, and the domain-mismatch guard.

use relmap_core::delta::{BidiMapDelta, DomainPair};
use relmap_core::errors::RelmapError;
use relmap_core::model::{BidiMap, InternMap};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn relation(pairs: &[(&str, &str)]) -> BidiMap {
    let mut map = BidiMap::new("holders", "held");
    for (holder, held) in pairs {
        map.record(holder, held).unwrap();
    }
    map
}

fn domains() -> (InternMap, InternMap) {
    (InternMap::new("holders"), InternMap::new("held"))
}

// ---------------------------------------------------------------------------
// Raw subtraction
// ---------------------------------------------------------------------------

// final H1 -> {x, y} vs initial H1 -> {y}
//   → added {H1 -> {x}}, still {H1 -> {y}}, removed empty
#[test]
fn test_partial_holder_overlap() {
    let (holders, held) = domains();
    let mut delta = BidiMapDelta::new_all(&holders, &held);
    let final_map = relation(&[("H1", "x"), ("H1", "y")]);
    let initial = relation(&[("H1", "y")]);
    delta.subtract(&final_map, &initial).unwrap();

    let added = delta.added().unwrap();
    assert_eq!(added.pair_count(), 1);
    assert!(added.contains("H1", "x"));

    let still = delta.still().unwrap();
    assert_eq!(still.pair_count(), 1);
    assert!(still.contains("H1", "y"));

    assert!(delta.is_null_removed());
    assert!(!delta.is_unchanged());
}

#[test]
fn test_holder_exclusive_to_one_side() {
    let (holders, held) = domains();
    let mut delta = BidiMapDelta::new_all(&holders, &held);
    let final_map = relation(&[("OnlyFinal", "x")]);
    let initial = relation(&[("OnlyInitial", "y")]);
    delta.subtract(&final_map, &initial).unwrap();

    assert!(delta.added().unwrap().contains("OnlyFinal", "x"));
    assert!(delta.removed().unwrap().contains("OnlyInitial", "y"));
    assert!(delta.is_null_still());
}

#[test]
fn test_identical_relations_all_still() {
    let (holders, held) = domains();
    let mut delta = BidiMapDelta::new_all(&holders, &held);
    let snapshot = relation(&[("H1", "x"), ("H1", "y"), ("H2", "x")]);
    delta.subtract(&snapshot, &snapshot.clone()).unwrap();

    assert!(delta.is_unchanged());
    let still = delta.still().unwrap();
    assert_eq!(still.pair_count(), 3);
    // Reverse index holds in the bucket maps too
    let x_holders: Vec<_> = still.holders_of("x").unwrap().iter().collect();
    assert_eq!(x_holders, ["H1", "H2"]);
}

// Pairs on both sides never reach the removed bucket: pass 1 classifies
// them as still and pass 2 only records absences.
#[test]
fn test_still_pairs_recorded_once() {
    let (holders, held) = domains();
    let mut delta = BidiMapDelta::new_all(&holders, &held);
    let final_map = relation(&[("H1", "shared")]);
    let initial = relation(&[("H1", "shared"), ("H1", "dropped")]);
    delta.subtract(&final_map, &initial).unwrap();

    assert_eq!(delta.still().unwrap().pair_count(), 1);
    let removed = delta.removed().unwrap();
    assert_eq!(removed.pair_count(), 1);
    assert!(removed.contains("H1", "dropped"));
    assert!(!removed.contains("H1", "shared"));
}

#[test]
fn test_empty_relations_unchanged() {
    let (holders, held) = domains();
    let mut delta = BidiMapDelta::new_all(&holders, &held);
    delta
        .subtract(&relation(&[]), &relation(&[]))
        .unwrap();
    assert!(delta.is_unchanged());
    assert!(delta.is_null_still());
}

// ---------------------------------------------------------------------------
// Disabled buckets
// ---------------------------------------------------------------------------

#[test]
fn test_disabled_buckets_stay_none() {
    let (holders, held) = domains();
    let mut delta = BidiMapDelta::new(&holders, &held, true, false, false);
    let final_map = relation(&[("H1", "x"), ("H2", "y")]);
    let initial = relation(&[("H2", "y"), ("H3", "z")]);
    delta.subtract(&final_map, &initial).unwrap();

    assert!(delta.removed().is_none());
    assert!(delta.still().is_none());
    assert!(delta.is_null_removed());
    assert!(delta.added().unwrap().contains("H1", "x"));
    // Recording into a disabled bucket reports Ok(false)
    assert!(!delta.record_removed("H9", "q").unwrap());
}

#[test]
fn test_bucket_maps_carry_domain_tags() {
    let (holders, held) = domains();
    let delta = BidiMapDelta::new_all(&holders, &held);
    let added = delta.added().unwrap();
    assert_eq!(added.holder_tag(), "holders");
    assert_eq!(added.held_tag(), "held");
}

// ---------------------------------------------------------------------------
// Interned subtraction
// ---------------------------------------------------------------------------

#[test]
fn test_subtract_interned_rejects_foreign_final_domains() {
    let (holders, held) = domains();
    let other = InternMap::new("widgets");
    let mut delta = BidiMapDelta::new_all(&holders, &held);
    let err = delta
        .subtract_interned(
            &relation(&[]),
            DomainPair::new(&other, &held),
            &relation(&[]),
            DomainPair::new(&holders, &held),
        )
        .unwrap_err();
    assert!(matches!(err, RelmapError::DomainMismatch { .. }));
}

#[test]
fn test_subtract_interned_same_domains_matches_raw() {
    let (mut holders, mut held) = domains();
    holders.intern_all(["H1", "H2"]);
    held.intern_all(["x", "y"]);

    let final_map = relation(&[("H1", "x"), ("H2", "y")]);
    let initial = relation(&[("H1", "x"), ("H1", "y")]);

    let mut raw = BidiMapDelta::new_all(&holders, &held);
    raw.subtract(&final_map, &initial).unwrap();

    let mut interned = BidiMapDelta::new_all(&holders, &held);
    let pair = DomainPair::new(&holders, &held);
    interned
        .subtract_interned(&final_map, pair, &initial, pair)
        .unwrap();

    assert_eq!(raw, interned);
}

// ---------------------------------------------------------------------------
// Describe
// ---------------------------------------------------------------------------

#[test]
fn test_describe_reports_pair_counts() {
    let (holders, held) = domains();
    let mut delta = BidiMapDelta::new(&holders, &held, true, true, false);
    delta
        .subtract(&relation(&[("H1", "x"), ("H1", "y")]), &relation(&[("H2", "z")]))
        .unwrap();
    let mut lines = Vec::new();
    delta.describe("[bidi]", &mut lines);
    assert_eq!(
        lines,
        vec![
            "[bidi] Added [ 2 ]",
            "[bidi] Removed [ 1 ]",
            "[bidi] Still [ not tracked ]",
        ]
    );
}
