//! forge-core: Core library for the forge issue tracker
//!
//! Provides the data model, persistence, and repository registry for a
//! local file-backed issue and task tracker. No daemon, no database - just
//! JSON documents under .forge/.

pub mod config;
pub mod error;
pub mod id;
pub mod issue;
pub mod registry;
pub mod store;
pub mod task_list;
pub mod workspace;

pub use config::Config;
pub use error::Error;
pub use id::IdAllocator;
pub use issue::Issue;
pub use registry::{Registry, Suggestion, validate_name};
pub use store::IssueStore;
pub use task_list::{Comment, Task, TaskList, TaskListStore, TaskPatch};
pub use workspace::Workspace;

/// Result type for forge operations
pub type Result<T> = std::result::Result<T, Error>;
