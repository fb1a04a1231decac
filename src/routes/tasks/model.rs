use chrono::DateTime;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Serialized as English `low`/`medium`/`high`; the Portuguese names are
/// accepted on input only, through `FromStr`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for Priority {
    type Err = String;

    // "baixa"/"media"/"alta" are what older clients send
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" | "baixa" => Ok(Priority::Low),
            "medium" | "media" => Ok(Priority::Medium),
            "high" | "alta" => Ok(Priority::High),
            other => Err(format!(
                "priority must be one of [low, medium, high], got {other:?}"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Applies a `completed` value, moving `completed_at` only on an actual transition.
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        if completed && !self.completed {
            self.completed_at = Some(now);
        }
        if !completed && self.completed {
            self.completed_at = None;
        }
        self.completed = completed;
    }
}
