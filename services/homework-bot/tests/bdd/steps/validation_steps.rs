//! BDD step definitions for response validation feature

use cucumber::{given, then, when};
use homework_bot::response::check_response;
use homework_bot::BotError;

use crate::world::HomeworkBotWorld;

/// Map a feature-file error kind to the matching error variant
pub fn assert_error_kind(err: &BotError, kind: &str) {
    let matches = match kind {
        "type" => matches!(err, BotError::UnexpectedType(_)),
        "missing key" => matches!(err, BotError::MissingKey(_)),
        "unknown status" => matches!(err, BotError::UnknownStatus(_)),
        "api connect" => matches!(err, BotError::ApiConnect(_)),
        "api response" => matches!(err, BotError::ApiResponse(_)),
        "delivery" => matches!(err, BotError::Delivery(_)),
        "missing credentials" => matches!(err, BotError::MissingCredentials(_)),
        other => panic!("Unknown error kind: {}", other),
    };
    assert!(matches, "expected a {} error, got {:?}", kind, err);
}

#[given(expr = "an API payload {string}")]
fn api_payload(world: &mut HomeworkBotWorld, json: String) {
    world.payload = Some(serde_json::from_str(&json).expect("payload is not valid JSON"));
}

#[when("the payload is validated")]
fn payload_validated(world: &mut HomeworkBotWorld) {
    let payload = world.payload.as_ref().expect("payload not set");
    world.validation_result = Some(check_response(payload).map(|records| records.to_vec()));
}

#[then(expr = "validation should return {int} record(s)")]
fn validation_returns(world: &mut HomeworkBotWorld, count: usize) {
    let result = world.validation_result.as_ref().expect("no result");
    let records = result.as_ref().expect("validation failed");
    assert_eq!(records.len(), count);
}

#[then(expr = "validation should fail with a {string} error")]
fn validation_fails(world: &mut HomeworkBotWorld, kind: String) {
    let result = world.validation_result.as_ref().expect("no result");
    let err = result.as_ref().expect_err("validation succeeded");
    assert_error_kind(err, &kind);
}
