//! Git integration.
//!
//! Commands only need one thing from version control: create a branch at
//! HEAD and switch to it. That capability is the [`BranchCheckout`] trait,
//! handed to the command layer explicitly. [`GitRepo`] implements it over
//! libgit2.

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository};

use crate::error::{Error, Result};

/// Create a branch with the given name and check it out.
pub trait BranchCheckout {
    fn create_and_checkout(&self, branch: &str) -> Result<()>;
}

/// Discover a git repository from a starting path.
pub fn discover_repo(start: Option<&Path>) -> Result<Repository> {
    let start_path = match start {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };

    Repository::discover(&start_path).map_err(|err| {
        if err.code() == ErrorCode::NotFound {
            Error::RepoNotFound(start_path)
        } else {
            Error::Git(err)
        }
    })
}

/// Open a repository and validate it is a non-bare checkout.
pub fn open_repo(start: Option<&Path>) -> Result<Repository> {
    let repo = discover_repo(start)?;
    if repo.is_bare() {
        return Err(Error::OperationFailed(
            "bare repositories are not supported".to_string(),
        ));
    }
    Ok(repo)
}

/// A git working tree.
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open the repository containing `start` (or the current directory).
    pub fn open(start: Option<&Path>) -> Result<Self> {
        Ok(Self {
            repo: open_repo(start)?,
        })
    }
}

impl BranchCheckout for GitRepo {
    fn create_and_checkout(&self, branch: &str) -> Result<()> {
        let head = self.repo.head().map_err(|err| {
            if err.code() == ErrorCode::UnbornBranch {
                Error::OperationFailed(format!(
                    "cannot create branch '{branch}': repository has no commits"
                ))
            } else {
                Error::Git(err)
            }
        })?;
        let commit = head.peel_to_commit()?;

        // Written as a plain ref: branch names may start with '-' when the
        // project has no abbreviation.
        let refname = format!("refs/heads/{branch}");
        if self.repo.find_reference(&refname).is_ok() {
            return Err(Error::OperationFailed(format!(
                "Branch '{branch}' already exists"
            )));
        }
        self.repo.reference(&refname, commit.id(), false, "tt task start")?;

        // New branch points at HEAD, so the tree checkout only refreshes the index
        self.repo.checkout_tree(commit.as_object(), None)?;
        self.repo.set_head(&refname)?;

        tracing::debug!(branch, commit = %commit.id(), "created and checked out branch");
        Ok(())
    }
}

/// The repository containing a directory, opened only when a branch is
/// actually requested.
#[derive(Debug, Clone)]
pub struct DiscoveredRepo {
    start: PathBuf,
}

impl DiscoveredRepo {
    pub fn new(start: impl Into<PathBuf>) -> Self {
        Self {
            start: start.into(),
        }
    }
}

impl BranchCheckout for DiscoveredRepo {
    fn create_and_checkout(&self, branch: &str) -> Result<()> {
        GitRepo::open(Some(&self.start))?.create_and_checkout(branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Repository) {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = Repository::init(dir.path()).expect("init repo");
        (dir, repo)
    }

    fn commit_initial(repo: &Repository) {
        std::fs::write(
            repo.workdir().expect("workdir").join("README.md"),
            "base\n",
        )
        .expect("write file");
        let mut index = repo.index().expect("index");
        index.add_path(Path::new("README.md")).expect("add path");
        index.write().expect("write index");
        let tree_id = index.write_tree().expect("write tree");
        let tree = repo.find_tree(tree_id).expect("find tree");
        let sig = Signature::now("tt-test", "tt-test@example.com").expect("signature");
        repo.commit(Some("HEAD"), &sig, &sig, "initial commit", &tree, &[])
            .expect("commit");
    }

    fn current_branch(repo: &Repository) -> Option<String> {
        let head = repo.head().ok()?;
        if !head.is_branch() {
            return None;
        }
        head.shorthand().map(String::from)
    }

    #[test]
    fn create_and_checkout_switches_head() {
        let (dir, repo) = init_repo();
        commit_initial(&repo);

        let git = GitRepo::open(Some(dir.path())).expect("open repo");
        git.create_and_checkout("APP-3/fix-bug").expect("create branch");

        assert_eq!(current_branch(&repo).as_deref(), Some("APP-3/fix-bug"));
    }

    #[test]
    fn create_and_checkout_accepts_leading_dash() {
        let (dir, repo) = init_repo();
        commit_initial(&repo);

        let git = GitRepo::open(Some(dir.path())).expect("open repo");
        git.create_and_checkout("-1/fix-bug").expect("create branch");

        assert_eq!(current_branch(&repo).as_deref(), Some("-1/fix-bug"));
        let err = git.create_and_checkout("-1/fix-bug").expect_err("duplicate");
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn create_and_checkout_rejects_existing_branch() {
        let (dir, repo) = init_repo();
        commit_initial(&repo);

        let git = GitRepo::open(Some(dir.path())).expect("open repo");
        git.create_and_checkout("APP-1/one").expect("first create");

        let err = git.create_and_checkout("APP-1/one").expect_err("duplicate");
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn create_and_checkout_requires_a_commit() {
        let (dir, _repo) = init_repo();

        let git = GitRepo::open(Some(dir.path())).expect("open repo");
        let err = git.create_and_checkout("APP-1/one").expect_err("unborn");
        assert!(err.to_string().contains("no commits"));
    }

    #[test]
    fn discovered_repo_opens_lazily() {
        let (dir, repo) = init_repo();
        commit_initial(&repo);
        let nested = dir.path().join("sub");
        std::fs::create_dir(&nested).expect("mkdir");

        DiscoveredRepo::new(&nested)
            .create_and_checkout("DEMO-1/lazy")
            .expect("create branch");
        assert_eq!(current_branch(&repo).as_deref(), Some("DEMO-1/lazy"));
    }

    #[test]
    fn open_outside_repo_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = GitRepo::open(Some(dir.path())).err().expect("no repo");
        assert!(matches!(err, Error::RepoNotFound(_)));
    }
}
