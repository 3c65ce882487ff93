//! Per-issue document store
//!
//! One pretty-printed JSON file per issue under issues/, named by id.
//! No index: enumeration reads the directory.

use crate::{Error, Issue, Result};
use std::fs;
use std::path::PathBuf;

/// File-per-issue store
pub struct IssueStore {
    dir: PathBuf,
    prefix: String,
}

impl IssueStore {
    pub fn new(dir: impl Into<PathBuf>, prefix: &str) -> Self {
        Self {
            dir: dir.into(),
            prefix: format!("{}-", prefix),
        }
    }

    /// Persist a new issue document, returning its path
    pub fn create(&self, issue: &Issue) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.issue_path(&issue.id);
        fs::write(&path, serde_json::to_vec_pretty(issue)?)?;
        tracing::debug!(id = %issue.id, "saved issue");
        Ok(path)
    }

    /// Load an issue by id; None if no such document exists
    pub fn load(&self, id: &str) -> Result<Option<Issue>> {
        let path = self.issue_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path)?;
        let issue =
            serde_json::from_str(&raw).map_err(|source| Error::Malformed { path, source })?;
        Ok(Some(issue))
    }

    /// Load every issue, sorted by id ascending
    ///
    /// All-or-nothing: a single malformed document fails the whole call.
    pub fn load_all(&self) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();
        if !self.dir.exists() {
            return Ok(issues);
        }

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();

            let is_issue_doc = path.extension().is_some_and(|ext| ext == "json")
                && path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .is_some_and(|stem| stem.starts_with(&self.prefix));
            if !is_issue_doc {
                continue;
            }

            let raw = fs::read_to_string(&path)?;
            let issue: Issue =
                serde_json::from_str(&raw).map_err(|source| Error::Malformed { path, source })?;
            issues.push(issue);
        }

        // Fixed-width zero padding makes the lexicographic sort numeric.
        issues.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(issues)
    }

    fn issue_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}
