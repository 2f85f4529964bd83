//! BDD step definitions for startup feature

use cucumber::{given, then, when};
use homework_bot::config::{PRACTICUM_TOKEN_VAR, TELEGRAM_CHAT_ID_VAR, TELEGRAM_TOKEN_VAR};
use homework_bot::BotError;

use crate::world::HomeworkBotWorld;

#[given(expr = "the environment variable {word} is empty")]
fn env_var_empty(world: &mut HomeworkBotWorld, name: String) {
    let credentials = &mut world.config_mut().credentials;
    match name.as_str() {
        PRACTICUM_TOKEN_VAR => credentials.practicum_token.clear(),
        TELEGRAM_TOKEN_VAR => credentials.telegram_token.clear(),
        TELEGRAM_CHAT_ID_VAR => credentials.telegram_chat_id.clear(),
        other => panic!("Unknown variable: {}", other),
    }
}

#[when("the bot is started")]
async fn bot_started(world: &mut HomeworkBotWorld) {
    let config = world.config_mut().clone();
    let http = world.http();
    world.run_result = Some(homework_bot::run_with(config, http).await);
}

#[then(expr = "startup should fail naming {word}")]
fn startup_fails(world: &mut HomeworkBotWorld, name: String) {
    let result = world.run_result.as_ref().expect("bot was not started");
    match result {
        Err(BotError::MissingCredentials(names)) => {
            assert!(names.contains(&name), "{} not in '{}'", name, names)
        }
        other => panic!("expected MissingCredentials, got {:?}", other),
    }
}

#[then("the status API should not have been polled")]
fn api_not_polled(world: &mut HomeworkBotWorld) {
    assert_eq!(world.http().get_count(), 0);
}

#[then("no message should have been sent")]
fn nothing_posted(world: &mut HomeworkBotWorld) {
    assert_eq!(world.http().post_count(), 0);
}
