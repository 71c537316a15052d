use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A geographic point, either attached to a task or handed off from the
/// location-picking flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A single to-do item.
///
/// `created_at` is kept as ISO-8601 text rather than a typed datetime:
/// remote imports and stored snapshots may carry values we did not write,
/// and an unreadable timestamp must degrade during sorting instead of
/// failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub location: Option<Coordinate>,
    pub created_at: String,
}

impl Task {
    /// Parse the creation timestamp, falling back to the epoch when the
    /// stored text is unreadable.
    pub fn created_at_utc(&self) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Fields captured by the creation flow before a task exists anywhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub location: Option<Coordinate>,
}

/// View-level predicate selecting tasks by completion state.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    Completed,
    Incomplete,
}

/// View-level ordering criterion.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortKey {
    #[default]
    Date,
    Title,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task(created_at: &str) -> Task {
        Task {
            id: "1".to_string(),
            title: "Test".to_string(),
            description: String::new(),
            completed: false,
            location: None,
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_created_at_parses_rfc3339() {
        let t = task("2026-08-05T10:30:00.000Z");
        let expected = Utc.with_ymd_and_hms(2026, 8, 5, 10, 30, 0).unwrap();
        assert_eq!(t.created_at_utc(), expected);
    }

    #[test]
    fn test_created_at_falls_back_to_epoch() {
        let t = task("not a timestamp");
        assert_eq!(t.created_at_utc(), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_task_round_trips_through_json() {
        let t = Task {
            id: "1722600000000".to_string(),
            title: "Buy milk".to_string(),
            description: "2 liters".to_string(),
            completed: false,
            location: Some(Coordinate {
                latitude: 41.0082,
                longitude: 28.9784,
            }),
            created_at: "2026-08-05T10:30:00.000Z".to_string(),
        };

        let json = serde_json::to_string(&t).unwrap();
        // Field names on the wire match the stored snapshot format.
        assert!(json.contains("\"createdAt\""));
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_task_defaults_for_missing_fields() {
        let t: Task =
            serde_json::from_str(r#"{"id":"7","title":"Call mom","createdAt":"x"}"#).unwrap();
        assert_eq!(t.description, "");
        assert!(!t.completed);
        assert!(t.location.is_none());
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(Filter::Incomplete.to_string(), "incomplete");
        assert_eq!(SortKey::Date.to_string(), "date");
        assert_eq!("title".parse::<SortKey>().unwrap(), SortKey::Title);
    }
}
