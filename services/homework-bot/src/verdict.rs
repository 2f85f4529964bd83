//! Homework statuses and their human-readable verdicts

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::response::json_type_name;
use crate::BotError;

pub const HOMEWORK_NAME_KEY: &str = "homework_name";
pub const STATUS_KEY: &str = "status";

/// Review status of a homework submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// Status code as reported by the API
    pub fn code(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Verdict text shown to the student
    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for HomeworkStatus {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == s)
            .ok_or_else(|| BotError::UnknownStatus(s.to_string()))
    }
}

/// A single entry of the `homeworks` array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub homework_name: String,
    pub status: HomeworkStatus,
}

impl HomeworkRecord {
    pub fn from_value(record: &Value) -> crate::Result<Self> {
        let map = record.as_object().ok_or_else(|| {
            BotError::UnexpectedType(format!(
                "homework record is {}, expected an object",
                json_type_name(record)
            ))
        })?;

        let homework_name = required_str(map, HOMEWORK_NAME_KEY)?;
        let status = required_str(map, STATUS_KEY)?.parse()?;

        Ok(Self {
            homework_name: homework_name.to_string(),
            status,
        })
    }

    pub fn message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.homework_name,
            self.status.verdict()
        )
    }
}

fn required_str<'a>(
    map: &'a serde_json::Map<String, Value>,
    key: &str,
) -> crate::Result<&'a str> {
    let value = map
        .get(key)
        .ok_or_else(|| BotError::MissingKey(key.to_string()))?;
    value.as_str().ok_or_else(|| {
        BotError::UnexpectedType(format!(
            "'{}' is {}, expected a string",
            key,
            json_type_name(value)
        ))
    })
}

/// Translate one homework record into the notification text
pub fn parse_status(record: &Value) -> crate::Result<String> {
    HomeworkRecord::from_value(record).map(|r| r.message())
}
