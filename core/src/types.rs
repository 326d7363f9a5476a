//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates. Field
//! names are part of the wire contract and must not be renamed.

use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote store. Never minted locally.
pub type TodoId = i64;

/// Category used when the input carries no hashtag.
pub const DEFAULT_CATEGORY: &str = "Default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Free-form recurrence, e.g. "every 2 weeks on Tuesday and Thursday, 10 times".
///
/// Every field is optional. An empty pattern is accepted as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrencePattern {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_every: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<DayOfWeek>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_repeats: Option<u32>,
}

/// How often a todo repeats.
///
/// Externally tagged on the wire: unit variants are bare strings (`"Daily"`),
/// the custom case is `{"CustomRecurrence": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecurringType {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    CustomRecurrence(RecurrencePattern),
}

/// A single todo item as stored by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub item_name: String,
    /// ISO-8601 date, passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub task_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_type: Option<RecurringType>,
    pub done: bool,
}

/// Request payload for creating a new todo. Same shape as [`TodoItem`]
/// without the server-assigned `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodoItem {
    pub item_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub task_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_type: Option<RecurringType>,
    #[serde(default)]
    pub done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_recurrence_serializes_as_bare_string() {
        let json = serde_json::to_value(RecurringType::Weekly).unwrap();
        assert_eq!(json, serde_json::json!("Weekly"));
    }

    #[test]
    fn custom_recurrence_is_externally_tagged() {
        let recurring = RecurringType::CustomRecurrence(RecurrencePattern {
            repeat_every: Some(2),
            days_of_week: Some(vec![DayOfWeek::Tuesday, DayOfWeek::Thursday]),
            total_repeats: None,
        });
        let json = serde_json::to_value(&recurring).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "CustomRecurrence": {
                    "repeat_every": 2,
                    "days_of_week": ["Tuesday", "Thursday"]
                }
            })
        );
    }

    #[test]
    fn todo_item_accepts_null_optionals() {
        let item: TodoItem = serde_json::from_str(
            r#"{"id":3,"item_name":"Pay rent","due_date":null,"task_category":"home","recurring_type":null,"done":false}"#,
        )
        .unwrap();
        assert_eq!(item.id, 3);
        assert!(item.due_date.is_none());
        assert!(item.recurring_type.is_none());
    }

    #[test]
    fn todo_item_accepts_missing_optionals() {
        let item: TodoItem =
            serde_json::from_str(r#"{"id":1,"item_name":"Walk dog","task_category":"Default","done":true}"#)
                .unwrap();
        assert!(item.done);
        assert_eq!(item.task_category, DEFAULT_CATEGORY);
    }

    #[test]
    fn todo_item_with_monthly_recurrence_parses() {
        let item: TodoItem = serde_json::from_str(
            r#"{"id":9,"item_name":"Invoice","due_date":"2024-05-01","task_category":"work","recurring_type":"Monthly","done":false}"#,
        )
        .unwrap();
        assert_eq!(item.recurring_type, Some(RecurringType::Monthly));
        assert_eq!(item.due_date.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn new_todo_item_omits_absent_optionals() {
        let input = NewTodoItem {
            item_name: "Buy milk".to_string(),
            due_date: None,
            task_category: "errands".to_string(),
            recurring_type: None,
            done: false,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"item_name": "Buy milk", "task_category": "errands", "done": false})
        );
        assert!(json.get("id").is_none());
    }
}
