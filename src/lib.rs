//! tasktrack - Task tracking library
//!
//! Core functionality for the `tt` CLI: a project document holding tasks,
//! stored as a single JSON file, with a git branch created when a task is
//! started.
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap, one submodule per command group
//! - `config`: Configuration loading from `.tasktrack.toml`
//! - `error`: Error types and result aliases
//! - `git`: Branch creation capability and its libgit2 implementation
//! - `output`: Human and JSON output formatting
//! - `project`: Project document model and task lifecycle
//! - `storage`: Reading and writing the project document

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod output;
pub mod project;
pub mod storage;

pub use error::{Error, Result};
