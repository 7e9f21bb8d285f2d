//! tt project commands
//!
//! `init` creates the project document, `info` lists it, and `migrate`
//! rewrites it through the current schema so older documents pick up
//! field defaults.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::project::{Project, Task};
use crate::storage::Storage;

pub struct InitOptions {
    pub name: String,
    pub abbv: String,
    pub storage: Storage,
    pub output: OutputOptions,
}

#[derive(Debug, Serialize)]
pub struct InitReport {
    pub path: PathBuf,
    pub name: String,
    pub project_abbv: String,
    pub overwritten: bool,
}

#[derive(Debug, Serialize)]
pub struct InfoReport<'a> {
    pub name: &'a str,
    pub project_abbv: &'a str,
    pub next_id: u64,
    pub tasks: Vec<&'a Task>,
}

#[derive(Debug, Serialize)]
pub struct MigrateReport {
    pub path: PathBuf,
    pub changed: bool,
    pub tasks: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity_error: Option<String>,
}

/// Write a fresh project document. An existing document is replaced.
pub fn init(storage: &Storage, name: &str, abbv: &str) -> Result<InitReport> {
    let overwritten = storage.exists();
    let project = Project::new(name, abbv);
    storage.write(&project)?;

    if overwritten {
        tracing::debug!(path = %storage.path().display(), "replaced existing project document");
    }

    Ok(InitReport {
        path: storage.path().to_path_buf(),
        name: project.name,
        project_abbv: project.project_abbv,
        overwritten,
    })
}

/// Re-read and re-write the document.
///
/// Fields missing from older documents come back with their defaults.
/// Invariant violations are reported but do not block the rewrite.
pub fn migrate(storage: &Storage) -> Result<MigrateReport> {
    let before = storage.read_raw()?;
    let project = storage.read()?;
    let integrity_error = project.validate().err().map(|err| err.to_string());

    storage.write(&project)?;
    let after = storage.read_raw()?;

    Ok(MigrateReport {
        path: storage.path().to_path_buf(),
        changed: before != after,
        tasks: project.tasks.len(),
        integrity_error,
    })
}

pub fn run_init(options: InitOptions) -> Result<()> {
    let report = init(&options.storage, &options.name, &options.abbv)?;

    let mut human = HumanOutput::new(format!("Project initialized: {}", report.name));
    human.push_summary("file", report.path.display().to_string());
    if report.project_abbv.is_empty() {
        human.push_summary("abbv", "(none)");
        human.push_warning("no --abbv given; task branches will be named '-<id>/<title>'");
    } else {
        human.push_summary("abbv", report.project_abbv.clone());
    }
    if report.overwritten {
        human.push_warning("replaced an existing project document");
    }
    human.push_next_step("tt task add --title \"...\"");

    emit_success(options.output, "project init", &report, Some(&human))
}

pub fn run_info(storage: &Storage, output: OutputOptions) -> Result<()> {
    let project = storage.read()?;
    let tasks = project.task_iter();

    let mut human = HumanOutput::new(format!("Project: {}", project.name));
    for task in &tasks {
        human.push_line(format!("  {} {}: {}", task.status.glyph(), task.id, task.title));
    }

    let report = InfoReport {
        name: &project.name,
        project_abbv: &project.project_abbv,
        next_id: project.next_id,
        tasks,
    };

    emit_success(output, "project info", &report, Some(&human))
}

pub fn run_migrate(storage: &Storage, output: OutputOptions) -> Result<()> {
    let report = migrate(storage)?;

    let header = if report.changed {
        "Project document migrated"
    } else {
        "Project document already up to date"
    };
    let mut human = HumanOutput::new(header);
    human.push_summary("file", report.path.display().to_string());
    human.push_summary("tasks", report.tasks.to_string());
    if let Some(problem) = &report.integrity_error {
        human.push_warning(problem.clone());
    }

    emit_success(output, "project migrate", &report, Some(&human))
}
