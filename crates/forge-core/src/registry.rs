//! Repository registry for forge
//!
//! Persists the set of known repository names in repos.json and offers
//! substring-based suggestions for near-miss lookups. Matching is
//! deliberately permissive: a wrong suggestion costs the user nothing,
//! a missed one costs a duplicate repository record.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const MIN_NAME_LEN: usize = 2;
const MAX_NAME_LEN: usize = 50;

/// Outcome of a fuzzy registry lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    /// A registered name equals the input ignoring case
    Exact,
    /// Near-miss candidates in registry (sorted) order; may be empty
    Candidates(Vec<String>),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryDoc {
    #[serde(default)]
    repositories: Vec<String>,
}

/// File-backed set of known repository names, kept sorted
pub struct Registry {
    path: PathBuf,
    seed: Vec<String>,
}

impl Registry {
    pub fn new(path: impl Into<PathBuf>, seed: Vec<String>) -> Self {
        Self {
            path: path.into(),
            seed,
        }
    }

    /// Load all registered names, bootstrapping the seed set on first use
    pub fn load(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            let mut names = self.seed.clone();
            names.sort();
            self.write(&names)?;
            tracing::debug!(count = names.len(), "seeded repository registry");
            return Ok(names);
        }

        let raw = fs::read_to_string(&self.path)?;
        let doc: RegistryDoc =
            serde_json::from_str(&raw).map_err(|e| Error::RegistryCorrupt(e.to_string()))?;
        Ok(doc.repositories)
    }

    /// Add a name to the registry
    ///
    /// Returns false without writing if the name is already present
    /// (case-sensitive). The set is re-sorted and rewritten atomically.
    pub fn add(&self, name: &str) -> Result<bool> {
        let mut names = self.load()?;
        if names.iter().any(|n| n == name) {
            return Ok(false);
        }

        names.push(name.to_string());
        names.sort();
        self.write(&names)?;
        tracing::debug!(name, "registered repository");
        Ok(true)
    }

    /// Suggest registered names similar to the input
    ///
    /// A case-insensitive exact match short-circuits the scan. Otherwise
    /// every name where either folded string contains the other is a
    /// candidate. No edit distance; just substring overlap.
    pub fn suggest(&self, input: &str) -> Result<Suggestion> {
        let names = self.load()?;
        let needle = input.to_lowercase();
        let needle_key = fold_name(input);

        let mut candidates = Vec::new();
        for name in &names {
            if name.to_lowercase() == needle {
                return Ok(Suggestion::Exact);
            }
            let key = fold_name(name);
            if key.contains(&needle_key) || needle_key.contains(&key) {
                candidates.push(name.clone());
            }
        }

        Ok(Suggestion::Candidates(candidates))
    }

    // Write-then-rename so a crash mid-write cannot leave a truncated
    // registry behind.
    fn write(&self, names: &[String]) -> Result<()> {
        let doc = RegistryDoc {
            repositories: names.to_vec(),
        };
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&doc)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

// Fold a name for similarity comparison: lowercase with the separator
// characters removed, so "MyRepo" and "my-repo" compare equal.
fn fold_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect::<String>()
        .to_lowercase()
}

/// Validate a repository or task-list name
///
/// Names are limited to letters, numbers, hyphens, and underscores,
/// between 2 and 50 characters.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::InvalidName(name.to_string()));
    }
    if name.len() < MIN_NAME_LEN {
        return Err(Error::NameTooShort(name.to_string()));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(Error::NameTooLong(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn registry_in(dir: &std::path::Path) -> Registry {
        Registry::new(
            dir.join("repos.json"),
            vec!["my-app".to_string(), "backend-api".to_string()],
        )
    }

    #[test]
    fn test_first_load_seeds_registry_sorted() {
        let dir = tempdir().unwrap();
        let registry = registry_in(dir.path());

        let names = registry.load().unwrap();
        assert_eq!(names, ["backend-api", "my-app"]);
        assert!(dir.path().join("repos.json").exists());

        // second load reads the persisted seed
        assert_eq!(registry.load().unwrap(), ["backend-api", "my-app"]);
    }

    #[test]
    fn test_add_keeps_sorted_order() {
        let dir = tempdir().unwrap();
        let registry = registry_in(dir.path());

        assert!(registry.add("aardvark").unwrap());
        assert!(registry.add("zebra").unwrap());
        assert_eq!(
            registry.load().unwrap(),
            ["aardvark", "backend-api", "my-app", "zebra"]
        );
    }

    #[test]
    fn test_add_is_idempotent() {
        let dir = tempdir().unwrap();
        let registry = registry_in(dir.path());

        assert!(registry.add("new-repo").unwrap());
        assert!(!registry.add("new-repo").unwrap());

        let names = registry.load().unwrap();
        assert_eq!(names.iter().filter(|n| *n == "new-repo").count(), 1);
    }

    #[test]
    fn test_suggest_exact_match_ignores_case() {
        let dir = tempdir().unwrap();
        let registry = registry_in(dir.path());

        assert_eq!(registry.suggest("my-app").unwrap(), Suggestion::Exact);
        assert_eq!(registry.suggest("MY-APP").unwrap(), Suggestion::Exact);
    }

    #[test]
    fn test_suggest_substring_candidates() {
        let dir = tempdir().unwrap();
        let registry = registry_in(dir.path());

        // input contained in registered name
        assert_eq!(
            registry.suggest("backend").unwrap(),
            Suggestion::Candidates(vec!["backend-api".to_string()])
        );
        // registered name contained in input
        assert_eq!(
            registry.suggest("my-app-v2").unwrap(),
            Suggestion::Candidates(vec!["my-app".to_string()])
        );
        // nothing similar
        assert_eq!(
            registry.suggest("unrelated").unwrap(),
            Suggestion::Candidates(vec![])
        );
    }

    #[test]
    fn test_suggest_folds_separators() {
        let dir = tempdir().unwrap();
        let registry = Registry::new(dir.path().join("repos.json"), vec![]);
        registry.add("my-repo").unwrap();

        // not an exact match, but similar once case and separators fold
        assert_eq!(
            registry.suggest("MyRepo").unwrap(),
            Suggestion::Candidates(vec!["my-repo".to_string()])
        );
        assert_eq!(registry.suggest("my-repo").unwrap(), Suggestion::Exact);
    }

    #[test]
    fn test_corrupt_registry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("repos.json");
        std::fs::write(&path, "{not json").unwrap();

        let registry = Registry::new(&path, vec![]);
        assert!(matches!(registry.load(), Err(Error::RegistryCorrupt(_))));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("my-repo_2").is_ok());
        assert!(validate_name("ab").is_ok());

        assert!(matches!(validate_name(""), Err(Error::InvalidName(_))));
        assert!(matches!(
            validate_name("has space"),
            Err(Error::InvalidName(_))
        ));
        assert!(matches!(
            validate_name("dot.dot"),
            Err(Error::InvalidName(_))
        ));
        assert!(matches!(validate_name("a"), Err(Error::NameTooShort(_))));
        assert!(matches!(
            validate_name(&"x".repeat(51)),
            Err(Error::NameTooLong(_))
        ));
        assert!(validate_name(&"x".repeat(50)).is_ok());
    }
}
