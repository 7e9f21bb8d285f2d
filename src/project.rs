//! Project document model for tasktrack.
//!
//! A project document holds the project metadata and every task, keyed by
//! task id. Ids come from a monotonically increasing counter and are never
//! reused.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Status of a task. The lifecycle is `incomplete -> started -> complete`,
/// but commands do not guard against other transitions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Incomplete,
    Started,
    Complete,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Incomplete => "incomplete",
            TaskStatus::Started => "started",
            TaskStatus::Complete => "complete",
        }
    }

    /// Glyph shown next to a task in `project info`
    pub fn glyph(&self) -> &'static str {
        match self {
            TaskStatus::Complete => "✅",
            TaskStatus::Incomplete => "⭕",
            TaskStatus::Started => "⏩",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            status: TaskStatus::Incomplete,
        }
    }

    /// Branch created when work on this task starts.
    ///
    /// `{abbv}-{id}/{title}` with the title lowercased and every space
    /// replaced by a hyphen. Nothing else is escaped.
    pub fn branch_name(&self, project_abbv: &str) -> String {
        format!(
            "{}-{}/{}",
            project_abbv,
            self.id,
            self.title.to_lowercase().replace(' ', "-")
        )
    }
}

/// The persisted project document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub project_abbv: String,
    #[serde(default)]
    pub next_id: u64,
    #[serde(default)]
    pub tasks: BTreeMap<u64, Task>,
}

impl Project {
    pub fn new(name: impl Into<String>, project_abbv: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project_abbv: project_abbv.into(),
            next_id: 0,
            tasks: BTreeMap::new(),
        }
    }

    pub fn get_task(&self, id: u64) -> Result<&Task> {
        self.tasks.get(&id).ok_or(Error::TaskNotFound(id))
    }

    pub fn get_task_mut(&mut self, id: u64) -> Result<&mut Task> {
        self.tasks.get_mut(&id).ok_or(Error::TaskNotFound(id))
    }

    /// All tasks in ascending id order.
    pub fn task_iter(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.values().collect();
        tasks.sort_by_key(|task| task.id);
        tasks
    }

    /// Allocate the next id and insert a new incomplete task.
    ///
    /// Fails without modifying the document if the fresh id is already taken,
    /// which only happens when `next_id` has been corrupted.
    pub fn add_task(&mut self, title: impl Into<String>) -> Result<&Task> {
        let id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| Error::IntegrityViolation("task id counter overflow".to_string()))?;

        if self.tasks.contains_key(&id) {
            return Err(Error::IntegrityViolation(format!(
                "task id {id} is already allocated (next_id = {})",
                self.next_id
            )));
        }

        self.next_id = id;
        let task = self.tasks.entry(id).or_insert_with(|| Task::new(id, title));
        Ok(&*task)
    }

    /// Check the document invariants: every map key matches its task id,
    /// and `next_id` covers every allocated id.
    pub fn validate(&self) -> Result<()> {
        for (key, task) in &self.tasks {
            if *key != task.id {
                return Err(Error::IntegrityViolation(format!(
                    "task stored under key {key} has id {}",
                    task.id
                )));
            }
            if task.id == 0 {
                return Err(Error::IntegrityViolation(
                    "task ids must be positive".to_string(),
                ));
            }
        }

        if let Some(max) = self.tasks.keys().next_back() {
            if *max > self.next_id {
                return Err(Error::IntegrityViolation(format!(
                    "next_id {} is behind allocated id {max}",
                    self.next_id
                )));
            }
        }

        Ok(())
    }
}
