//! Command-line interface for tt
//!
//! This module defines the CLI structure using clap derive macros.
//! Project and task commands live in their own submodules.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::git::DiscoveredRepo;
use crate::output::OutputOptions;
use crate::storage::Storage;

pub mod project;
pub mod task;

/// tt - task tracking in a JSON file
///
/// Keeps a project's tasks in `tasks.json` and creates a git branch
/// when work on a task starts.
#[derive(Parser, Debug)]
#[command(name = "tt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the project document (defaults to tasks.json)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Project management
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create the project document (overwrites an existing one)
    Init {
        /// Project display name
        project_name: String,

        /// Abbreviation used as the branch-name prefix
        #[arg(long, default_value = "")]
        abbv: String,
    },

    /// Show the project and its tasks
    Info,

    /// Rewrite the project document with the current schema
    Migrate,
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Add a task
    Add {
        /// Task title (prompted for when omitted)
        #[arg(long)]
        title: Option<String>,
    },

    /// Mark a task started and check out its branch
    Start {
        /// Task ID
        #[arg(short = 't', long = "task-id")]
        task_id: u64,
    },

    /// Mark a task complete
    Complete {
        /// Task ID
        #[arg(short = 't', long = "task-id")]
        task_id: u64,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let cwd = std::env::current_dir()?;
        let config = Config::load_from_dir(&cwd)?;
        let storage = Storage::new(self.file.unwrap_or(config.file));
        let output = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };

        tracing::debug!(path = %storage.path().display(), "resolved project document");

        match self.command {
            Commands::Project(cmd) => match cmd {
                ProjectCommands::Init { project_name, abbv } => {
                    project::run_init(project::InitOptions {
                        name: project_name,
                        abbv,
                        storage,
                        output,
                    })
                }
                ProjectCommands::Info => project::run_info(&storage, output),
                ProjectCommands::Migrate => project::run_migrate(&storage, output),
            },
            Commands::Task(cmd) => match cmd {
                TaskCommands::Add { title } => task::run_add(task::AddOptions {
                    title,
                    storage,
                    output,
                }),
                TaskCommands::Start { task_id } => {
                    let repo = DiscoveredRepo::new(cwd);
                    let vcs: Option<&dyn crate::git::BranchCheckout> = if config.git.create_branch {
                        Some(&repo)
                    } else {
                        None
                    };
                    task::run_start(
                        task::StartOptions {
                            task_id,
                            storage,
                            output,
                        },
                        vcs,
                    )
                }
                TaskCommands::Complete { task_id } => task::run_complete(task::CompleteOptions {
                    task_id,
                    storage,
                    output,
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_task_start_short_flag() {
        let cli = Cli::try_parse_from(["tt", "task", "start", "-t", "3"]).unwrap();
        match cli.command {
            Commands::Task(TaskCommands::Start { task_id }) => assert_eq!(task_id, 3),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_task_complete_long_flag_and_globals() {
        let cli = Cli::try_parse_from([
            "tt",
            "task",
            "complete",
            "--task-id",
            "2",
            "--json",
            "--file",
            "other.json",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.file, Some(PathBuf::from("other.json")));
        assert!(matches!(
            cli.command,
            Commands::Task(TaskCommands::Complete { task_id: 2 })
        ));
    }

    #[test]
    fn init_abbv_defaults_to_empty() {
        let cli = Cli::try_parse_from(["tt", "project", "init", "Demo"]).unwrap();
        match cli.command {
            Commands::Project(ProjectCommands::Init { project_name, abbv }) => {
                assert_eq!(project_name, "Demo");
                assert_eq!(abbv, "");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_integer_task_id() {
        assert!(Cli::try_parse_from(["tt", "task", "start", "-t", "abc"]).is_err());
    }
}
