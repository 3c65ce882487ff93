//! CLI command implementations

use anyhow::{Result, bail};
use colored::Colorize;
use forge_core::{Issue, Suggestion, TaskPatch, Workspace, id::parse_id, validate_name};
use tabled::{Table, Tabled, settings::Style};

const LIST_CREATED_BY: &str = "local";
const LIST_ASSOCIATION: &str = "";

pub fn init() -> Result<()> {
    let ws = Workspace::init()?;
    println!(
        "{} Initialized forge in {}",
        "✓".green(),
        ws.forge_dir().display()
    );
    Ok(())
}

pub fn create(
    title: &str,
    repo: &str,
    description: Option<String>,
    force: bool,
    json: bool,
) -> Result<()> {
    let ws = Workspace::open()?;
    validate_name(repo)?;

    let registry = ws.registry();
    let names = registry.load()?;
    if !names.iter().any(|n| n == repo) && !force {
        match registry.suggest(repo)? {
            Suggestion::Exact => bail!(
                "Repository '{}' is registered with different casing. \
                 Check 'forge repo list', or pass --force to use the name as typed.",
                repo
            ),
            Suggestion::Candidates(candidates) if !candidates.is_empty() => {
                eprintln!("Repository '{}' not found in registry. Did you mean:", repo);
                for candidate in &candidates {
                    eprintln!("  {}", candidate);
                }
                bail!("Unknown repository '{}' (pass --force to use it anyway)", repo)
            }
            Suggestion::Candidates(_) => bail!(
                "Repository '{}' not found in registry (pass --force to use it anyway)",
                repo
            ),
        }
    }

    let id = ws.allocator().next()?;
    let issue = Issue::new(id.clone(), title.to_string(), description, repo.to_string());
    let path = ws.issues().create(&issue)?;

    if json {
        println!("{}", serde_json::to_string(&issue)?);
    } else {
        apply_color_setting(&ws);
        println!("{} Created issue: {}", "✓".green(), id.cyan());
        println!("  Title: {}", issue.title);
        println!("  Repository: {}", issue.repository);
        println!("  Saved to: {}", path.display());
    }

    Ok(())
}

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Repository")]
    repository: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Title")]
    title: String,
}

pub fn list(repo: Option<String>, json: bool) -> Result<()> {
    let ws = Workspace::open()?;
    let mut issues = ws.issues().load_all()?;

    if let Some(ref filter) = repo {
        let filter = filter.to_lowercase();
        issues.retain(|i| i.repository.to_lowercase() == filter);
    }

    if json {
        println!("{}", serde_json::to_string(&issues)?);
        return Ok(());
    }

    if issues.is_empty() {
        match repo {
            Some(r) => println!("No issues found for repository '{}'.", r),
            None => println!("No issues found."),
        }
        return Ok(());
    }

    apply_color_setting(&ws);
    let display = &ws.config().display;
    let rows: Vec<IssueRow> = issues
        .iter()
        .map(|issue| IssueRow {
            id: issue.id.clone(),
            repository: issue.repository.clone(),
            created: issue.created_at.format(&display.date_format).to_string(),
            title: truncate(&issue.title, display.max_title_length),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::sharp()));
    println!("Total: {} issue(s)", issues.len());
    Ok(())
}

pub fn show(id: &str, json: bool) -> Result<()> {
    let ws = Workspace::open()?;

    if parse_id(id).is_none() {
        bail!(
            "Invalid issue ID format: {} (expected {}-NNN)",
            id,
            ws.config().id_prefix
        );
    }

    let store = ws.issues();
    let Some(issue) = store.load(id)? else {
        // hint at recent ids; a failure here must not mask the real error
        if let Ok(all) = store.load_all() {
            if !all.is_empty() {
                eprintln!("Available issues:");
                for known in all.iter().rev().take(5) {
                    eprintln!("  {}", known.id);
                }
            }
        }
        bail!("Issue not found: {}", id)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&issue)?);
        return Ok(());
    }

    apply_color_setting(&ws);
    let display = &ws.config().display;
    println!("{} {}", issue.id.cyan().bold(), issue.title.bold());
    println!();
    println!("Repository: {}", issue.repository);
    println!("Created:    {}", issue.created_at.format(&display.date_format));
    println!();
    println!("{}", "Description:".bold());
    match issue.description.as_deref().filter(|d| !d.is_empty()) {
        Some(description) => println!("{}", description),
        None => println!("(No description provided)"),
    }

    Ok(())
}

pub fn repo_add(name: &str, json: bool) -> Result<()> {
    let ws = Workspace::open()?;
    validate_name(name)?;

    let registry = ws.registry();
    let added = registry.add(name)?;
    let total = registry.load()?.len();

    if json {
        println!(
            "{}",
            serde_json::json!({ "name": name, "added": added, "total": total })
        );
        return Ok(());
    }

    if !added {
        println!("Repository '{}' already exists in registry.", name);
        return Ok(());
    }

    apply_color_setting(&ws);
    println!("{} Added repository: {}", "✓".green(), name.cyan());
    println!("  Registry now contains {} repositories", total);
    Ok(())
}

pub fn repo_list(json: bool) -> Result<()> {
    let ws = Workspace::open()?;
    let names = ws.registry().load()?;

    if json {
        println!("{}", serde_json::to_string(&names)?);
        return Ok(());
    }

    if names.is_empty() {
        println!("No repositories found in registry.");
        return Ok(());
    }

    apply_color_setting(&ws);
    println!("{}", "Registered repositories:".bold());
    for (i, name) in names.iter().enumerate() {
        println!("{:3}. {}", i + 1, name);
    }
    println!("Total: {} repository(ies)", names.len());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn task_add(
    list: &str,
    subject: &str,
    description: &str,
    priority: &str,
    status: Option<&str>,
    created_by: &str,
    association: &str,
    json: bool,
) -> Result<()> {
    let ws = Workspace::open()?;
    let mut store = ws.open_task_list(list, created_by, association)?;
    let task = store.add_task(subject, description, priority, status)?;

    if json {
        println!("{}", serde_json::to_string(&task)?);
    } else {
        apply_color_setting(&ws);
        println!("{} Added task to '{}'", "✓".green(), list);
        println!("  ID: {}", task.task_id.cyan());
        println!("  Subject: {}", task.subject);
        println!("  Priority: {}", task.priority);
    }

    Ok(())
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "Task ID")]
    task_id: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Comments")]
    comments: usize,
    #[tabled(rename = "Subject")]
    subject: String,
}

pub fn task_list(list: &str, json: bool) -> Result<()> {
    let ws = Workspace::open()?;
    let store = ws.open_task_list(list, LIST_CREATED_BY, LIST_ASSOCIATION)?;

    if json {
        println!("{}", serde_json::to_string(store.list())?);
        return Ok(());
    }

    let tasks = &store.list().tasks;
    if tasks.is_empty() {
        println!("No tasks in list '{}'.", list);
        return Ok(());
    }

    apply_color_setting(&ws);
    let display = &ws.config().display;
    let rows: Vec<TaskRow> = tasks
        .iter()
        .map(|task| TaskRow {
            task_id: task.task_id.clone(),
            status: task.status.clone(),
            priority: task.priority.clone(),
            comments: task.comments.len(),
            subject: truncate(&task.subject, display.max_title_length),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::sharp()));
    println!("Total: {} task(s)", tasks.len());
    Ok(())
}

pub fn task_show(list: &str, task_id: &str, json: bool) -> Result<()> {
    let ws = Workspace::open()?;
    let store = ws.open_task_list(list, LIST_CREATED_BY, LIST_ASSOCIATION)?;
    let Some(task) = store.get_task(task_id) else {
        bail!("Task not found in '{}': {}", list, task_id)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
        return Ok(());
    }

    apply_color_setting(&ws);
    let display = &ws.config().display;
    println!("{} {}", task.task_id.cyan().bold(), task.subject.bold());
    println!();
    println!("Status:   {}", task.status);
    println!("Priority: {}", task.priority);
    println!("Created:  {}", task.date_created.format(&display.date_format));

    if !task.description.is_empty() {
        println!();
        println!("{}", "Description:".bold());
        println!("{}", task.description);
    }

    if !task.comments.is_empty() {
        println!();
        println!("{}", "Comments:".bold());
        for comment in &task.comments {
            println!(
                "  [{}] {}",
                comment.timestamp.format(&display.date_format),
                comment.comment
            );
        }
    }

    Ok(())
}

pub fn task_comment(list: &str, task_id: &str, text: &str, json: bool) -> Result<()> {
    let ws = Workspace::open()?;
    let mut store = ws.open_task_list(list, LIST_CREATED_BY, LIST_ASSOCIATION)?;

    if !store.add_comment(task_id, text)? {
        bail!("Task not found in '{}': {}", list, task_id)
    }

    if json {
        println!("{}", serde_json::json!({ "task_id": task_id, "commented": true }));
    } else {
        apply_color_setting(&ws);
        println!("{} Commented on {}", "✓".green(), task_id.cyan());
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn task_update(
    list: &str,
    task_id: &str,
    subject: Option<String>,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    json: bool,
) -> Result<()> {
    let ws = Workspace::open()?;
    let mut store = ws.open_task_list(list, LIST_CREATED_BY, LIST_ASSOCIATION)?;

    let patch = TaskPatch {
        subject,
        description,
        status,
        priority,
    };
    if !store.update_task(task_id, patch)? {
        bail!("Task not found in '{}': {}", list, task_id)
    }

    if json {
        let task = store.get_task(task_id);
        println!("{}", serde_json::to_string(&task)?);
    } else {
        apply_color_setting(&ws);
        println!("{} Updated {}", "✓".green(), task_id.cyan());
    }

    Ok(())
}

pub fn task_rm(list: &str, task_id: &str, json: bool) -> Result<()> {
    let ws = Workspace::open()?;
    let mut store = ws.open_task_list(list, LIST_CREATED_BY, LIST_ASSOCIATION)?;

    if !store.delete_task(task_id)? {
        bail!("Task not found in '{}': {}", list, task_id)
    }

    if json {
        println!("{}", serde_json::json!({ "task_id": task_id, "deleted": true }));
    } else {
        apply_color_setting(&ws);
        println!("{} Deleted {}", "✓".green(), task_id.cyan());
    }

    Ok(())
}

fn apply_color_setting(ws: &Workspace) {
    if !ws.config().display.colors {
        colored::control::set_override(false);
    }
}

fn truncate(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_length).collect();
    format!("{}...", cut)
}
