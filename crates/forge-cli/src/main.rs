//! forge - Local file-backed issue and task tracker
//!
//! No daemon, no database - just JSON documents in .forge/

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "forge")]
#[command(about = "Local file-backed issue and task tracker")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new forge workspace
    Init,

    /// Create a new issue
    Create {
        /// Issue title
        title: String,

        /// Repository the issue belongs to
        #[arg(short, long)]
        repo: String,

        /// Description
        #[arg(short, long)]
        description: Option<String>,

        /// Use the repository name even if it is not registered
        #[arg(long)]
        force: bool,
    },

    /// List issues
    List {
        /// Filter by repository
        #[arg(short, long)]
        repo: Option<String>,
    },

    /// Show issue details
    Show {
        /// Issue ID (e.g. ISSUE-001)
        id: String,
    },

    /// Manage the repository registry
    Repo {
        #[command(subcommand)]
        command: RepoCommands,
    },

    /// Manage task lists
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
}

#[derive(Subcommand)]
enum RepoCommands {
    /// Add a repository to the registry
    Add {
        /// Repository name
        name: String,
    },

    /// List registered repositories
    List,
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Add a task to a list, creating the list on first reference
    Add {
        /// Task list name
        #[arg(short, long)]
        list: String,

        /// Task subject
        subject: String,

        /// Description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Priority (free-form, e.g. high/medium/low)
        #[arg(short, long, default_value = "medium")]
        priority: String,

        /// Initial status (defaults to "open")
        #[arg(short, long)]
        status: Option<String>,

        /// Recorded as the list creator on first creation only
        #[arg(long, env = "USER", default_value = "local")]
        created_by: String,

        /// What the list is associated with, on first creation only
        #[arg(long, default_value = "")]
        association: String,
    },

    /// List tasks in a list
    List {
        /// Task list name
        #[arg(short, long)]
        list: String,
    },

    /// Show a task with its comments
    Show {
        /// Task list name
        #[arg(short, long)]
        list: String,

        /// Task id
        task_id: String,
    },

    /// Add a comment to a task
    Comment {
        /// Task list name
        #[arg(short, long)]
        list: String,

        /// Task id
        task_id: String,

        /// Comment text
        text: String,
    },

    /// Update task fields
    Update {
        /// Task list name
        #[arg(short, long)]
        list: String,

        /// Task id
        task_id: String,

        /// New subject
        #[arg(long)]
        subject: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New status
        #[arg(short, long)]
        status: Option<String>,

        /// New priority
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Delete a task
    Rm {
        /// Task list name
        #[arg(short, long)]
        list: String,

        /// Task id
        task_id: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init(),
        Commands::Create {
            title,
            repo,
            description,
            force,
        } => commands::create(&title, &repo, description, force, cli.json),
        Commands::List { repo } => commands::list(repo, cli.json),
        Commands::Show { id } => commands::show(&id, cli.json),
        Commands::Repo { command } => match command {
            RepoCommands::Add { name } => commands::repo_add(&name, cli.json),
            RepoCommands::List => commands::repo_list(cli.json),
        },
        Commands::Task { command } => match command {
            TaskCommands::Add {
                list,
                subject,
                description,
                priority,
                status,
                created_by,
                association,
            } => commands::task_add(
                &list,
                &subject,
                &description,
                &priority,
                status.as_deref(),
                &created_by,
                &association,
                cli.json,
            ),
            TaskCommands::List { list } => commands::task_list(&list, cli.json),
            TaskCommands::Show { list, task_id } => commands::task_show(&list, &task_id, cli.json),
            TaskCommands::Comment {
                list,
                task_id,
                text,
            } => commands::task_comment(&list, &task_id, &text, cli.json),
            TaskCommands::Update {
                list,
                task_id,
                subject,
                description,
                status,
                priority,
            } => commands::task_update(
                &list,
                &task_id,
                subject,
                description,
                status,
                priority,
                cli.json,
            ),
            TaskCommands::Rm { list, task_id } => commands::task_rm(&list, &task_id, cli.json),
        },
    }
}
