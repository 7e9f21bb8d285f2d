//! tt task commands
//!
//! Each command loads the project document, applies one change, and writes
//! the whole document back. `start` also creates the task branch; if that
//! fails the document is left untouched.

use serde::Serialize;

use crate::error::Result;
use crate::git::BranchCheckout;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::project::TaskStatus;
use crate::storage::Storage;

pub struct AddOptions {
    pub title: Option<String>,
    pub storage: Storage,
    pub output: OutputOptions,
}

pub struct StartOptions {
    pub task_id: u64,
    pub storage: Storage,
    pub output: OutputOptions,
}

pub struct CompleteOptions {
    pub task_id: u64,
    pub storage: Storage,
    pub output: OutputOptions,
}

#[derive(Debug, Serialize)]
pub struct AddReport {
    pub id: u64,
    pub title: String,
    pub status: TaskStatus,
}

#[derive(Debug, Serialize)]
pub struct StartReport {
    pub id: u64,
    pub title: String,
    pub status: TaskStatus,
    pub branch: String,
    pub branch_created: bool,
}

#[derive(Debug, Serialize)]
pub struct CompleteReport {
    pub id: u64,
    pub title: String,
    pub status: TaskStatus,
}

pub fn add(storage: &Storage, title: String) -> Result<AddReport> {
    let mut project = storage.read()?;
    let task = project.add_task(title)?;
    let report = AddReport {
        id: task.id,
        title: task.title.clone(),
        status: task.status,
    };
    storage.write(&project)?;

    tracing::debug!(id = report.id, "added task");
    Ok(report)
}

/// Mark a task started. With `vcs`, the task branch is created and checked
/// out before the document is written.
pub fn start(
    storage: &Storage,
    task_id: u64,
    vcs: Option<&dyn BranchCheckout>,
) -> Result<StartReport> {
    let mut project = storage.read()?;
    let branch = project.get_task(task_id)?.branch_name(&project.project_abbv);

    let task = project.get_task_mut(task_id)?;
    task.status = TaskStatus::Started;
    let report = StartReport {
        id: task.id,
        title: task.title.clone(),
        status: task.status,
        branch,
        branch_created: vcs.is_some(),
    };

    if let Some(vcs) = vcs {
        vcs.create_and_checkout(&report.branch)?;
    }
    storage.write(&project)?;

    tracing::debug!(id = task_id, branch = %report.branch, "started task");
    Ok(report)
}

pub fn complete(storage: &Storage, task_id: u64) -> Result<CompleteReport> {
    let mut project = storage.read()?;
    let task = project.get_task_mut(task_id)?;
    task.status = TaskStatus::Complete;
    let report = CompleteReport {
        id: task.id,
        title: task.title.clone(),
        status: task.status,
    };
    storage.write(&project)?;

    tracing::debug!(id = task_id, "completed task");
    Ok(report)
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let title = match options.title {
        Some(title) => title,
        None => prompt_title()?,
    };
    let report = add(&options.storage, title)?;

    let mut human = HumanOutput::new("Task added");
    human.push_summary("ID", report.id.to_string());
    human.push_summary("Title", report.title.clone());
    human.push_next_step(format!("tt task start -t {}", report.id));

    emit_success(options.output, "task add", &report, Some(&human))
}

pub fn run_start(options: StartOptions, vcs: Option<&dyn BranchCheckout>) -> Result<()> {
    let report = start(&options.storage, options.task_id, vcs)?;

    let mut human = HumanOutput::new("Task started");
    human.push_summary("ID", report.id.to_string());
    human.push_summary("Status", report.status.to_string());
    human.push_summary("Branch", report.branch.clone());
    if !report.branch_created {
        human.push_warning("branch creation disabled by git.create_branch");
    }

    emit_success(options.output, "task start", &report, Some(&human))
}

pub fn run_complete(options: CompleteOptions) -> Result<()> {
    let report = complete(&options.storage, options.task_id)?;
    let human = HumanOutput::new(format!("{} - Complete", report.title));
    emit_success(options.output, "task complete", &report, Some(&human))
}

fn prompt_title() -> Result<String> {
    let title = dialoguer::Input::<String>::new()
        .with_prompt("Title")
        .interact_text()?;
    Ok(title)
}
