//! Workspace discovery and layout
//!
//! All state lives under .forge/ at the workspace root, found by walking
//! up from the current directory. The workspace hands out component
//! handles; each component re-opens its file per operation, so no handle
//! outlives a single call.

use crate::{Config, Error, IdAllocator, IssueStore, Registry, Result, TaskListStore};
use std::fs;
use std::path::PathBuf;

const FORGE_DIR: &str = ".forge";
const CONFIG_FILE: &str = "config.toml";
const REGISTRY_FILE: &str = "repos.json";
const COUNTER_FILE: &str = "counter.txt";
const ISSUES_DIR: &str = "issues";
const TASK_LISTS_DIR: &str = "task_lists";

/// An opened forge workspace
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

impl Workspace {
    /// Find and open the workspace for the current directory
    pub fn open() -> Result<Self> {
        Self::open_at(Self::find_root()?)
    }

    /// Open a workspace rooted at an explicit directory
    pub fn open_at(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let config = Config::load(&root.join(FORGE_DIR).join(CONFIG_FILE))?;
        Ok(Self { root, config })
    }

    /// Initialize a new workspace in the current directory
    pub fn init() -> Result<Self> {
        Self::init_at(std::env::current_dir()?)
    }

    /// Initialize a new workspace rooted at an explicit directory
    pub fn init_at(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let forge_dir = root.join(FORGE_DIR);

        if forge_dir.exists() {
            return Err(Error::AlreadyInitialized(forge_dir.display().to_string()));
        }

        fs::create_dir_all(forge_dir.join(ISSUES_DIR))?;
        fs::create_dir_all(forge_dir.join(TASK_LISTS_DIR))?;
        fs::write(forge_dir.join(CONFIG_FILE), Config::default_with_comments())?;

        Ok(Self {
            root,
            config: Config::default(),
        })
    }

    /// Find the workspace root (directory containing .forge)
    fn find_root() -> Result<PathBuf> {
        let mut current = std::env::current_dir()?;
        loop {
            if current.join(FORGE_DIR).exists() {
                return Ok(current);
            }
            if !current.pop() {
                return Err(Error::NotInitialized);
            }
        }
    }

    /// Path to the .forge directory
    pub fn forge_dir(&self) -> PathBuf {
        self.root.join(FORGE_DIR)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The repository registry, seeded from config on first use
    pub fn registry(&self) -> Registry {
        Registry::new(
            self.forge_dir().join(REGISTRY_FILE),
            self.config.seed_repositories.clone(),
        )
    }

    /// The issue id allocator
    pub fn allocator(&self) -> IdAllocator {
        IdAllocator::new(self.forge_dir().join(COUNTER_FILE), &self.config.id_prefix)
    }

    /// The per-issue document store
    pub fn issues(&self) -> IssueStore {
        IssueStore::new(self.forge_dir().join(ISSUES_DIR), &self.config.id_prefix)
    }

    /// Open (or create) the named task list
    pub fn open_task_list(
        &self,
        name: &str,
        created_by: &str,
        association: &str,
    ) -> Result<TaskListStore> {
        TaskListStore::open(
            &self.forge_dir().join(TASK_LISTS_DIR),
            name,
            created_by,
            association,
        )
    }
}
