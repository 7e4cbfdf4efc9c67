// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Hook script templates.

/// Marker line identifying scripts written by convcheck.
pub const HOOK_MARKER: &str = "# convcheck git hook";

/// Hooks convcheck knows how to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookTemplate {
    /// Checks the commit message file git passes as `$1`.
    CommitMsg,
    /// Checks the current branch name before pushing.
    PrePush,
}

impl HookTemplate {
    /// All known hooks.
    pub fn all() -> &'static [HookTemplate] {
        &[HookTemplate::CommitMsg, HookTemplate::PrePush]
    }

    /// File name inside `.git/hooks`.
    pub fn filename(&self) -> &'static str {
        match self {
            HookTemplate::CommitMsg => "commit-msg",
            HookTemplate::PrePush => "pre-push",
        }
    }

    /// The convcheck invocation the hook runs.
    fn command(&self) -> &'static str {
        match self {
            HookTemplate::CommitMsg => r#"convcheck check --file "$1""#,
            HookTemplate::PrePush => "convcheck branch",
        }
    }

    /// Render the hook script.
    pub fn generate(&self) -> String {
        format!(
            "#!/bin/sh\n{}\n# Generated by convcheck v{}\n\nexec {}\n",
            HOOK_MARKER,
            crate::version::VERSION,
            self.command()
        )
    }
}

impl std::str::FromStr for HookTemplate {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commit-msg" | "commit_msg" => Ok(HookTemplate::CommitMsg),
            "pre-push" | "pre_push" => Ok(HookTemplate::PrePush),
            _ => Err(()),
        }
    }
}
