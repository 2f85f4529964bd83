//! BDD step definitions for status translation feature

use cucumber::{given, then, when};
use homework_bot::verdict::parse_status;

use crate::steps::validation_steps::assert_error_kind;
use crate::world::HomeworkBotWorld;

#[given(expr = "a homework record {string}")]
fn homework_record(world: &mut HomeworkBotWorld, json: String) {
    world.payload = Some(serde_json::from_str(&json).expect("record is not valid JSON"));
}

#[when("the record is translated")]
fn record_translated(world: &mut HomeworkBotWorld) {
    let record = world.payload.as_ref().expect("record not set");
    world.translation_result = Some(parse_status(record));
}

#[then(expr = "the message should be {string}")]
fn message_is(world: &mut HomeworkBotWorld, expected: String) {
    let result = world.translation_result.as_ref().expect("no result");
    assert_eq!(result.as_ref().expect("translation failed"), &expected);
}

#[then(expr = "translation should fail with a {string} error")]
fn translation_fails(world: &mut HomeworkBotWorld, kind: String) {
    let result = world.translation_result.as_ref().expect("no result");
    let err = result.as_ref().expect_err("translation succeeded");
    assert_error_kind(err, &kind);
}
