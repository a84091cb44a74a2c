use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A single task record.
///
/// Todos are immutable once constructed: the service supports creation and
/// deletion only. The `id` is supplied by the caller and is not guaranteed
/// to be unique within the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Caller-supplied identifier
    pub id: i64,
    /// Human-readable task name
    pub name: String,
    /// When the task is due (ISO 8601 on the wire, see [`parse_due_date`])
    #[serde(deserialize_with = "deserialize_due_date")]
    pub due_date: DateTime<Utc>,
    /// Whether the task has been completed
    pub is_completed: bool,
}

impl Todo {
    /// Create a new, not yet completed todo.
    pub fn new(id: i64, name: impl Into<String>, due_date: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            due_date,
            is_completed: false,
        }
    }

    /// Mark the todo as completed.
    pub fn completed(mut self) -> Self {
        self.is_completed = true;
        self
    }
}

/// Parse an ISO 8601 due date.
///
/// Accepted forms, tried in order:
/// - RFC 3339 with an offset (`2030-01-15T10:30:00+02:00`)
/// - date and time without an offset, taken as UTC (`2030-01-15T10:30:00`)
/// - a bare date, taken as midnight UTC (`2030-01-15`)
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive.and_utc());
    }

    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_due_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_due_date(&raw).ok_or_else(|| D::Error::custom(format!("unrecognised date `{raw}`")))
}
