//! Task model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task identifier, assigned locally or by the remote store
pub type TaskId = i64;

/// A single todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Empty in the title-only variant
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "owner_id", alias = "user_id", skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
}

impl Task {
    /// Create a new, not yet completed task stamped with the current time
    pub fn new(id: TaskId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            completed: false,
            created_at: Utc::now(),
            owner_id: None,
        }
    }

    /// Set the owner
    pub fn with_owner(mut self, owner_id: i64) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Set the creation timestamp
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Creation time formatted for display, e.g. `Oct 18, 2026, 09:05 AM`
    pub fn created_label(&self) -> String {
        self.created_at.format("%b %-d, %Y, %I:%M %p").to_string()
    }

    /// Text the search box matches against
    pub(crate) fn search_haystack(&self) -> String {
        if self.description.is_empty() {
            self.title.to_lowercase()
        } else {
            format!("{} {}", self.title, self.description).to_lowercase()
        }
    }
}

/// Which text fields a task carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldMode {
    /// Title and description, both required
    #[default]
    TitleAndDescription,
    /// A single text field; description is always stored empty
    TitleOnly,
}

impl FieldMode {
    /// Trim the inputs and return them if they satisfy this mode.
    pub fn accept(self, title: &str, description: &str) -> Option<(String, String)> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        match self {
            FieldMode::TitleAndDescription => {
                let description = description.trim();
                if description.is_empty() {
                    None
                } else {
                    Some((title.to_string(), description.to_string()))
                }
            }
            FieldMode::TitleOnly => Some((title.to_string(), String::new())),
        }
    }
}
