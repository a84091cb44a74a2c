//! Fuzz testing for todo decoding and creation-time validation.
//!
//! Ensures that arbitrary request bodies never panic while being decoded
//! into a `Todo`, and that validation of any decoded todo is total and
//! consistent with its two rules.
//!
//! # Running the Fuzz Tests
//!
//! ```bash
//! cargo +nightly install cargo-fuzz
//! cargo +nightly fuzz run fuzz_validation -- -max_total_time=60
//! ```

#![no_main]

use chrono::{DateTime, Utc};
use libfuzzer_sys::fuzz_target;
use serde_json::json;
use todo_service::Todo;
use todo_service::models::parse_due_date;
use todo_service::validation::{DUE_DATE_FIELD, IS_COMPLETED_FIELD, validate_new_todo};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as a request body
    if let Ok(todo) = serde_json::from_slice::<Todo>(data) {
        check_validation(&todo);
    }

    // Arbitrary text as the dueDate of an otherwise well-formed body
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    let body = json!({"id": 1, "name": "fuzz", "dueDate": raw, "isCompleted": false});
    let decoded = serde_json::from_value::<Todo>(body).ok();

    // Decoding accepts exactly the dates the parser accepts
    assert_eq!(decoded.as_ref().map(|t| t.due_date), parse_due_date(raw));

    if let Some(todo) = decoded {
        check_validation(&todo);
    }
});

fn check_validation(todo: &Todo) {
    // Fixed reference instant so the outcome is reproducible
    let now = DateTime::<Utc>::from_timestamp(1_900_000_000, 0).unwrap_or_default();

    match validate_new_todo(todo, now) {
        Ok(()) => assert!(todo.due_date >= now && !todo.is_completed),
        Err(errors) => {
            assert_eq!(errors.field(DUE_DATE_FIELD).is_some(), todo.due_date < now);
            assert_eq!(errors.field(IS_COMPLETED_FIELD).is_some(), todo.is_completed);
        }
    }
}
