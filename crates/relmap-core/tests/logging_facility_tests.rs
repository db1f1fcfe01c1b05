#![allow(clippy::unwrap_used, clippy::expect_used)]

use relmap_core::errors::RelmapError;
use relmap_core::logging_facility::test_capture::init_test_capture;
use relmap_core::{log_op_end, log_op_error, log_op_start};
use relmap_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let events = capture.events();
    let start_events: Vec<_> = events
        .iter()
        .filter(|e| e.op() == Some(op_name) && e.event() == Some(EVENT_START))
        .collect();

    assert!(
        !start_events.is_empty(),
        "Should have captured at least one start event"
    );
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_events: Vec<_> = events
        .iter()
        .filter(|e| e.op() == Some(op_name) && e.event() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = RelmapError::EmptyKey {
        bucket: "added".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events();
    let error_events: Vec<_> = events
        .iter()
        .filter(|e| e.op() == Some(op_name) && e.event() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(error_events[0].field("err.code"), Some("ERR_INVALID_KEY"));
}

#[test]
fn test_boundary_ownership_single_start_end() {
    let capture = init_test_capture();
    let op_name = "test_boundary_ownership_unique_4";

    log_op_start!(op_name, domain = "classes");
    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();

    let starts = events
        .iter()
        .filter(|e| e.op() == Some(op_name) && e.event() == Some(EVENT_START))
        .count();
    let ends = events
        .iter()
        .filter(|e| e.op() == Some(op_name) && e.event() == Some(EVENT_END))
        .count();

    assert_eq!(starts, 1, "Should have exactly one start event");
    assert_eq!(ends, 1, "Should have exactly one end event");
}

#[test]
fn test_domain_mismatch_error_code() {
    let capture = init_test_capture();
    let op_name = "test_domain_mismatch_unique_5";

    let err = RelmapError::DomainMismatch {
        expected: "classes:annotations".to_string(),
        actual: "fields:annotations".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 5);

    capture.assert_event_exists(op_name, EVENT_END_ERROR);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op() == Some(op_name) && e.event() == Some(EVENT_END_ERROR))
        .expect("Should have error event");

    assert_eq!(error_event.field("err.code"), Some("ERR_DOMAIN_MISMATCH"));
}

#[test]
fn test_log_macros_with_multiple_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_6";

    log_op_start!(op_name, holder_domain = "classes", held_domain = "annotations");

    let events = capture.events();
    let start_event = events
        .iter()
        .find(|e| e.op() == Some(op_name))
        .expect("Should have start event");

    assert_eq!(start_event.field("holder_domain"), Some("classes"));
    assert_eq!(start_event.field("held_domain"), Some("annotations"));
}

#[test]
fn test_end_event_carries_bucket_sizes() {
    let capture = init_test_capture();
    let op_name = "test_bucket_sizes_unique_7";

    log_op_end!(op_name, duration_ms = 3, added_len = 2, removed_len = 0);

    let events = capture.events();
    let end_event = events
        .iter()
        .find(|e| e.op() == Some(op_name) && e.event() == Some(EVENT_END))
        .expect("Should have end event");

    assert_eq!(end_event.field("added_len"), Some("2"));
    assert_eq!(end_event.field("removed_len"), Some("0"));
}

#[test]
fn test_test_capture_assert_event_exists() {
    let capture = init_test_capture();
    let op_name = "test_capture_assert_unique_8";

    log_op_start!(op_name);

    // This should not panic
    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();

    // This should panic because no such event exists
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_multiple_operations_logged_independently() {
    let capture = init_test_capture();
    let op1_name = "test_multi_ops_subtract_unique_10";
    let op2_name = "test_multi_ops_record_unique_10";

    log_op_start!(op1_name);
    log_op_end!(op1_name, duration_ms = 10);

    log_op_start!(op2_name);
    log_op_end!(op2_name, duration_ms = 5);

    let events = capture.events();

    let op1_events = events.iter().filter(|e| e.op() == Some(op1_name)).count();
    let op2_events = events.iter().filter(|e| e.op() == Some(op2_name)).count();

    assert_eq!(op1_events, 2); // start + end
    assert_eq!(op2_events, 2); // start + end
}
