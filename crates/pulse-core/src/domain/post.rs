use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A text post.
///
/// `author_user_id` is a plain reference; nothing enforces that the user
/// still exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post; `updated_at` starts equal to `created_at`.
    pub fn new(author_user_id: Uuid, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_user_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the content and bump `updated_at`.
    pub fn revise(&mut self, content: String) {
        // Stored timestamps have microsecond precision, so two quick edits
        // could otherwise record the same instant.
        let floor = self.updated_at + TimeDelta::microseconds(1);
        self.content = content;
        self.updated_at = Utc::now().max(floor);
    }
}
