// src/client/types.rs — Wire types for the remote task API

use serde::{Deserialize, Serialize};

/// A to-do item, owned by the remote API. The client only ever holds an
/// in-memory copy per page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Login/signup request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Body for `POST /tasks`. New tasks always start incomplete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            completed: false,
        }
    }
}

/// Partial update body for `PUT /tasks/{id}`. Absent fields are left
/// untouched by the server and omitted from the JSON payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Patch that only flips the completion flag (the toggle path).
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    /// Patch produced by the edit form.
    pub fn edit(
        title: impl Into<String>,
        description: impl Into<String>,
        completed: bool,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            completed: Some(completed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_deserialize() {
        let json = r#"{"id":"42","title":"Buy milk","description":"2%","completed":false}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "42");
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, "2%");
        assert!(!task.completed);
    }

    #[test]
    fn test_draft_starts_incomplete() {
        let draft = TaskDraft::new("Buy milk", "2%");
        assert!(!draft.completed);
    }

    #[test]
    fn test_patch_omits_absent_fields() {
        let patch = TaskPatch::completed(true);
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"completed":true}"#);
    }

    #[test]
    fn test_edit_patch_carries_all_fields() {
        let patch = TaskPatch::edit("New title", "New body", true);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["title"], "New title");
        assert_eq!(json["description"], "New body");
        assert_eq!(json["completed"], true);
    }
}
