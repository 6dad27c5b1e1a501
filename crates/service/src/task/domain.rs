use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Owner used when a request names no `userId`.
pub const DEFAULT_USER_ID: i32 = 1;

/// Task as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::task::Model> for Task {
    fn from(m: models::task::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            due_date: m.due_date,
            completed: m.completed,
            user_id: m.user_id,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

/// `POST` body. Only `title` is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub user_id: Option<i32>,
}

/// `PUT` body; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Parse a client supplied due date.
///
/// Blank means "no due date". Accepts `YYYY-MM-DD`, RFC 3339 timestamps and
/// naive ISO datetimes; only the calendar date is kept.
pub fn parse_due_date(raw: Option<&str>) -> Result<Option<NaiveDate>, ServiceError> {
    let s = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(s) => s,
    };
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(Some(d));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(Some(dt.date_naive()));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Some(dt.date()));
        }
    }
    Err(ServiceError::Validation(format!("invalid dueDate `{s}`")))
}

impl CreateTaskInput {
    /// Apply defaults: empty description, not completed, user 1.
    pub fn into_new_task(self) -> Result<models::task::NewTask, ServiceError> {
        Ok(models::task::NewTask {
            due_date: parse_due_date(self.due_date.as_deref())?,
            title: self.title,
            description: self.description.unwrap_or_default(),
            completed: self.completed.unwrap_or(false),
            user_id: self.user_id.unwrap_or(DEFAULT_USER_ID),
        })
    }
}

impl UpdateTaskInput {
    pub fn into_changes(self) -> Result<models::task::TaskChanges, ServiceError> {
        Ok(models::task::TaskChanges {
            due_date: parse_due_date(self.due_date.as_deref())?,
            title: self.title,
            description: self.description,
            completed: self.completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_date_formats() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(parse_due_date(Some("2024-03-09")).unwrap(), Some(d));
        assert_eq!(parse_due_date(Some("2024-03-09T10:30:00")).unwrap(), Some(d));
        assert_eq!(parse_due_date(Some("2024-03-09T10:30:00Z")).unwrap(), Some(d));
        assert_eq!(parse_due_date(Some("2024-03-09T10:30")).unwrap(), Some(d));
        assert_eq!(parse_due_date(Some("")).unwrap(), None);
        assert_eq!(parse_due_date(None).unwrap(), None);
        assert!(matches!(parse_due_date(Some("next tuesday")), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn create_input_defaults() {
        let input: CreateTaskInput = serde_json::from_str(r#"{"title": "buy milk"}"#).unwrap();
        let new = input.into_new_task().unwrap();
        assert_eq!(new.title, "buy milk");
        assert_eq!(new.description, "");
        assert!(!new.completed);
        assert_eq!(new.user_id, DEFAULT_USER_ID);
        assert_eq!(new.due_date, None);
    }

    #[test]
    fn create_input_requires_title() {
        let res = serde_json::from_str::<CreateTaskInput>(r#"{"description": "x"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn task_serializes_camel_case() {
        let now = Utc::now();
        let t = Task {
            id: 1,
            title: "t".into(),
            description: String::new(),
            due_date: None,
            completed: false,
            user_id: 1,
            created_at: now,
            updated_at: now,
        };
        let v = serde_json::to_value(&t).unwrap();
        for key in ["id", "title", "description", "dueDate", "completed", "userId", "createdAt", "updatedAt"] {
            assert!(v.get(key).is_some(), "missing {key}");
        }
    }
}
