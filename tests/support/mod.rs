#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use git2::{IndexAddOption, Oid, Repository, Signature};
use serde_json::Value;
use tempfile::TempDir;

/// Scratch directory with an optional git repository in it.
pub struct TestDir {
    dir: TempDir,
    repo: Option<Repository>,
}

impl TestDir {
    /// Plain directory, not under version control.
    pub fn plain() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir, repo: None }
    }

    /// Git repository with one commit on its initial branch.
    pub fn git() -> Result<Self, Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let repo = Repository::init(dir.path())?;
        set_identity(&repo)?;
        let test_dir = Self {
            dir,
            repo: Some(repo),
        };
        test_dir.write_file("README.md", "base\n")?;
        test_dir.commit_all("initial commit")?;
        Ok(test_dir)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn document_path(&self) -> PathBuf {
        self.dir.path().join("tasks.json")
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn read_document(&self) -> String {
        fs::read_to_string(self.document_path()).expect("read tasks.json")
    }

    pub fn document_json(&self) -> Value {
        serde_json::from_str(&self.read_document()).expect("parse tasks.json")
    }

    pub fn current_branch(&self) -> Option<String> {
        let repo = self.repo.as_ref()?;
        let head = repo.head().ok()?;
        head.shorthand().map(String::from)
    }

    pub fn commit_all(&self, message: &str) -> Result<Oid, git2::Error> {
        let repo = self.repo.as_ref().expect("git test dir");
        let mut index = repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;
        let sig = Signature::now("tt-test", "tt-test@example.com")?;

        let parent = repo
            .head()
            .ok()
            .and_then(|head| head.target())
            .and_then(|oid| repo.find_commit(oid).ok());

        match parent {
            Some(parent) => repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent]),
            None => repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[]),
        }
    }

    /// `tt` invocation running inside this directory
    pub fn tt(&self) -> Command {
        let mut cmd = tt_cmd();
        cmd.current_dir(self.path());
        cmd
    }
}

pub fn tt_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tt").expect("tt binary");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn set_identity(repo: &Repository) -> Result<(), git2::Error> {
    let mut cfg = repo.config()?;
    cfg.set_str("user.name", "tt-test")?;
    cfg.set_str("user.email", "tt-test@example.com")?;
    Ok(())
}
