//! Task-list aggregate store
//!
//! Each named list is one JSON document holding its tasks and their
//! comments. Every mutation rewrites the whole document; the rewrite is
//! not atomic against a crash mid-write.

use crate::registry::validate_name;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const LIST_VERSION: &str = "1.0.0";
const DEFAULT_STATUS: &str = "open";

/// A comment attached to a task. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub comment: String,
    pub timestamp: DateTime<Utc>,
}

/// A single task within a list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique token (UUID v4)
    pub task_id: String,
    pub subject: String,
    pub description: String,
    /// Free-form status, "open" on creation
    pub status: String,
    pub date_created: DateTime<Utc>,
    /// Free-form priority
    pub priority: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// The aggregate document persisted per list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskList {
    pub version: String,
    pub name: String,
    pub association: String,
    pub created_by: String,
    pub created_on: DateTime<Utc>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Task fields that may be overwritten in place
///
/// Identity fields (task_id, date_created, comments) are not patchable.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// Store for one named task list
pub struct TaskListStore {
    path: PathBuf,
    data: TaskList,
}

impl TaskListStore {
    /// Open a list by name, creating it on first reference
    ///
    /// `created_by` and `association` apply only when the list does not
    /// exist yet; an existing document keeps its original values.
    pub fn open(dir: &Path, name: &str, created_by: &str, association: &str) -> Result<Self> {
        validate_name(name)?;
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.json", name));

        if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let data: TaskList = serde_json::from_str(&raw).map_err(|source| Error::Malformed {
                path: path.clone(),
                source,
            })?;
            return Ok(Self { path, data });
        }

        let data = TaskList {
            version: LIST_VERSION.to_string(),
            name: name.to_string(),
            association: association.to_string(),
            created_by: created_by.to_string(),
            created_on: Utc::now(),
            tasks: Vec::new(),
        };
        let store = Self { path, data };
        store.save()?;
        Ok(store)
    }

    /// The in-memory document
    pub fn list(&self) -> &TaskList {
        &self.data
    }

    /// Append a new task and persist the document
    ///
    /// Status defaults to "open" when not supplied.
    pub fn add_task(
        &mut self,
        subject: &str,
        description: &str,
        priority: &str,
        status: Option<&str>,
    ) -> Result<Task> {
        let task = Task {
            task_id: Uuid::new_v4().to_string(),
            subject: subject.to_string(),
            description: description.to_string(),
            status: status.unwrap_or(DEFAULT_STATUS).to_string(),
            date_created: Utc::now(),
            priority: priority.to_string(),
            comments: Vec::new(),
        };
        self.data.tasks.push(task.clone());
        self.save()?;
        Ok(task)
    }

    /// Append a comment to the task with the given id
    ///
    /// Returns false without writing if no task matches.
    pub fn add_comment(&mut self, task_id: &str, text: &str) -> Result<bool> {
        let Some(task) = self.data.tasks.iter_mut().find(|t| t.task_id == task_id) else {
            return Ok(false);
        };
        task.comments.push(Comment {
            comment: text.to_string(),
            timestamp: Utc::now(),
        });
        self.save()?;
        Ok(true)
    }

    /// Find a task by id
    pub fn get_task(&self, task_id: &str) -> Option<&Task> {
        self.data.tasks.iter().find(|t| t.task_id == task_id)
    }

    /// Overwrite the supplied fields of the task with the given id
    ///
    /// Persists only when the task was found; returns whether it was.
    pub fn update_task(&mut self, task_id: &str, patch: TaskPatch) -> Result<bool> {
        let Some(task) = self.data.tasks.iter_mut().find(|t| t.task_id == task_id) else {
            return Ok(false);
        };

        if let Some(subject) = patch.subject {
            task.subject = subject;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }

        self.save()?;
        Ok(true)
    }

    /// Remove the task with the given id
    ///
    /// Persists only if a task was actually removed.
    pub fn delete_task(&mut self, task_id: &str) -> Result<bool> {
        let before = self.data.tasks.len();
        self.data.tasks.retain(|t| t.task_id != task_id);
        if self.data.tasks.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    fn save(&self) -> Result<()> {
        fs::write(&self.path, serde_json::to_vec_pretty(&self.data)?)?;
        tracing::debug!(list = %self.data.name, tasks = self.data.tasks.len(), "saved task list");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_list(dir: &Path) -> TaskListStore {
        TaskListStore::open(dir, "sprint-1", "alex", "my-app").unwrap()
    }

    #[test]
    fn test_first_open_creates_document() {
        let dir = tempdir().unwrap();
        let store = open_list(dir.path());

        assert!(dir.path().join("sprint-1.json").exists());
        assert_eq!(store.list().version, "1.0.0");
        assert_eq!(store.list().name, "sprint-1");
        assert_eq!(store.list().created_by, "alex");
        assert_eq!(store.list().association, "my-app");
        assert!(store.list().tasks.is_empty());
    }

    #[test]
    fn test_reopen_keeps_original_metadata() {
        let dir = tempdir().unwrap();
        open_list(dir.path());

        // first-write-wins: later arguments are ignored
        let reopened = TaskListStore::open(dir.path(), "sprint-1", "sam", "other-app").unwrap();
        assert_eq!(reopened.list().created_by, "alex");
        assert_eq!(reopened.list().association, "my-app");
    }

    #[test]
    fn test_add_task_defaults() {
        let dir = tempdir().unwrap();
        let mut store = open_list(dir.path());

        let task = store.add_task("write docs", "user guide", "high", None).unwrap();
        assert_eq!(task.status, "open");
        assert!(task.comments.is_empty());
        assert!(!task.task_id.is_empty());

        let reopened = open_list(dir.path());
        assert_eq!(reopened.list().tasks.len(), 1);
        assert_eq!(reopened.get_task(&task.task_id).unwrap().subject, "write docs");
    }

    #[test]
    fn test_task_ids_are_unique() {
        let dir = tempdir().unwrap();
        let mut store = open_list(dir.path());

        let a = store.add_task("a", "", "low", None).unwrap();
        let b = store.add_task("b", "", "low", None).unwrap();
        assert_ne!(a.task_id, b.task_id);
    }

    #[test]
    fn test_add_comment() {
        let dir = tempdir().unwrap();
        let mut store = open_list(dir.path());
        let task = store.add_task("a", "", "low", None).unwrap();

        assert!(store.add_comment(&task.task_id, "looks good").unwrap());

        let reopened = open_list(dir.path());
        let comments = &reopened.get_task(&task.task_id).unwrap().comments;
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].comment, "looks good");
    }

    #[test]
    fn test_add_comment_unknown_task_leaves_document_unchanged() {
        let dir = tempdir().unwrap();
        let mut store = open_list(dir.path());
        let task = store.add_task("a", "", "low", None).unwrap();

        let before = fs::read(dir.path().join("sprint-1.json")).unwrap();
        assert!(!store.add_comment("no-such-id", "dropped").unwrap());
        let after = fs::read(dir.path().join("sprint-1.json")).unwrap();
        assert_eq!(before, after);

        let reopened = open_list(dir.path());
        assert!(reopened.get_task(&task.task_id).unwrap().comments.is_empty());
    }

    #[test]
    fn test_update_task_patches_only_supplied_fields() {
        let dir = tempdir().unwrap();
        let mut store = open_list(dir.path());
        let task = store.add_task("subject", "description", "low", None).unwrap();

        let patch = TaskPatch {
            status: Some("done".to_string()),
            priority: Some("high".to_string()),
            ..TaskPatch::default()
        };
        assert!(store.update_task(&task.task_id, patch).unwrap());

        let reopened = open_list(dir.path());
        let updated = reopened.get_task(&task.task_id).unwrap();
        assert_eq!(updated.status, "done");
        assert_eq!(updated.priority, "high");
        assert_eq!(updated.subject, "subject");
        assert_eq!(updated.description, "description");
        assert_eq!(updated.date_created, task.date_created);
    }

    #[test]
    fn test_update_unknown_task() {
        let dir = tempdir().unwrap();
        let mut store = open_list(dir.path());
        assert!(!store.update_task("no-such-id", TaskPatch::default()).unwrap());
    }

    #[test]
    fn test_delete_task() {
        let dir = tempdir().unwrap();
        let mut store = open_list(dir.path());
        let keep = store.add_task("keep", "", "low", None).unwrap();
        let gone = store.add_task("gone", "", "low", None).unwrap();

        assert!(store.delete_task(&gone.task_id).unwrap());
        assert!(store.get_task(&gone.task_id).is_none());
        assert!(!store.delete_task(&gone.task_id).unwrap());

        let reopened = open_list(dir.path());
        assert_eq!(reopened.list().tasks.len(), 1);
        assert!(reopened.get_task(&keep.task_id).is_some());
    }

    #[test]
    fn test_open_malformed_document() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("sprint-1.json"), "{broken").unwrap();

        let result = TaskListStore::open(dir.path(), "sprint-1", "alex", "my-app");
        assert!(matches!(result, Err(Error::Malformed { .. })));
    }

    #[test]
    fn test_open_rejects_invalid_list_name() {
        let dir = tempdir().unwrap();
        let result = TaskListStore::open(dir.path(), "../escape", "alex", "my-app");
        assert!(matches!(result, Err(Error::InvalidName(_))));
    }
}
