// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository lookups: current branch and commit messages.

use crate::error::{ConvError, GitError, Result};
use git2::{ErrorCode, Oid, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository exposing the lookups convcheck needs.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Open the repository containing the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            ConvError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open the repository containing `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let inner = Git2Repo::discover(path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                ConvError::Git(GitError::NotARepository)
            } else {
                ConvError::Git(GitError::from(e))
            }
        })?;

        tracing::debug!("Opened repository at {:?}", inner.path());
        Ok(Self { inner })
    }

    /// Name of the checked-out branch, without `refs/heads/`.
    ///
    /// An unborn branch (fresh repository) still has a name and is returned.
    pub fn branch_name(&self) -> Result<String> {
        match self.inner.head() {
            Ok(head) if head.is_branch() => head.shorthand().map(str::to_string).ok_or_else(|| {
                ConvError::Git(GitError::BranchFailed {
                    message: "Invalid branch name encoding".to_string(),
                })
            }),
            Ok(_) => Err(ConvError::Git(GitError::DetachedHead)),
            Err(e) if e.code() == ErrorCode::UnbornBranch => self.unborn_branch_name(),
            Err(e) => Err(ConvError::Git(GitError::BranchFailed {
                message: e.message().to_string(),
            })),
        }
    }

    fn unborn_branch_name(&self) -> Result<String> {
        let head = self.inner.find_reference("HEAD").map_err(|e| {
            ConvError::Git(GitError::BranchFailed {
                message: e.message().to_string(),
            })
        })?;

        head.symbolic_target()
            .and_then(|target| target.strip_prefix("refs/heads/"))
            .map(str::to_string)
            .ok_or(ConvError::Git(GitError::DetachedHead))
    }

    fn resolve(&self, reference: &str) -> Result<git2::Commit<'_>> {
        self.inner
            .revparse_single(reference)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|e| {
                ConvError::Git(GitError::InvalidReference {
                    reference: format!("{}: {}", reference, e.message()),
                })
            })
    }

    /// Commits for a single revision or an `A..B` range, newest first.
    pub fn get_commits_in_range(&self, range: &str) -> Result<Vec<(Oid, String)>> {
        let Some((from, to)) = range.split_once("..") else {
            let commit = self.resolve(range)?;
            return Ok(vec![(commit.id(), message_of(&commit))]);
        };

        let walk_err = |command: &str, e: git2::Error| {
            ConvError::Git(GitError::CommandFailed {
                command: command.to_string(),
                message: e.message().to_string(),
            })
        };

        let to = if to.is_empty() { "HEAD" } else { to };
        let mut revwalk = self.inner.revwalk().map_err(|e| walk_err("revwalk", e))?;
        revwalk
            .push(self.resolve(to)?.id())
            .map_err(|e| walk_err("revwalk.push", e))?;
        revwalk
            .hide(self.resolve(from)?.id())
            .map_err(|e| walk_err("revwalk.hide", e))?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid.map_err(|e| walk_err("revwalk", e))?;
            let commit = self.resolve(&oid.to_string())?;
            commits.push((oid, message_of(&commit)));
        }

        tracing::debug!("{} commits in {}", commits.len(), range);
        Ok(commits)
    }

    /// Get the git directory path (.git).
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }
}

fn message_of(commit: &git2::Commit<'_>) -> String {
    String::from_utf8_lossy(commit.message_bytes()).into_owned()
}

/// Open the repository from the current directory.
pub fn open_repo() -> Result<Repository> {
    Repository::open_current()
}

/// Get the current branch name.
pub fn get_branch_name() -> Result<String> {
    open_repo()?.branch_name()
}

/// Get `(sha, message)` pairs for a revision or range.
pub fn get_commit_range(range: &str) -> Result<Vec<(String, String)>> {
    let commits = open_repo()?.get_commits_in_range(range)?;
    Ok(commits
        .into_iter()
        .map(|(oid, msg)| (oid.to_string(), msg))
        .collect())
}
