//! Issue data model for forge
//!
//! Issues are immutable once created: there is no update or delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single tracked issue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Unique identifier (ISSUE-NNN)
    pub id: String,

    /// Issue title
    pub title: String,

    /// Detailed description
    pub description: Option<String>,

    /// Repository the issue belongs to
    ///
    /// Expected to name a registry entry, but not enforced.
    pub repository: String,

    /// When the issue was created
    pub created_at: DateTime<Utc>,
}

impl Issue {
    /// Create a new issue stamped with the current time
    pub fn new(id: String, title: String, description: Option<String>, repository: String) -> Self {
        Self {
            id,
            title,
            description,
            repository,
            created_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.id, self.repository, self.title)
    }
}
