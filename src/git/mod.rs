// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! Supplies branch names and commit messages to check.

mod repo;

pub use repo::{get_branch_name, get_commit_range, open_repo, Repository};
