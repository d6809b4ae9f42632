// Data model for the to-do list

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single to-do entry.
///
/// Serialized field names are camelCase (`dueDate`, `importantFlag`) to match
/// the slot format written by earlier versions of the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identity, assigned from the store's monotonic counter. Never reused.
    pub id: u64,
    /// Task label, non-empty after trimming.
    pub text: String,
    /// Optional due date, normalized to midnight UTC of the supplied calendar day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    /// Importance marker, toggled by a dedicated gesture. Independent of `completed`.
    #[serde(default)]
    pub important_flag: bool,
}

impl Task {
    pub fn new(id: u64, text: String, due_date: Option<DateTime<Utc>>) -> Self {
        Self {
            id,
            text,
            due_date,
            completed: false,
            important_flag: false,
        }
    }
}
