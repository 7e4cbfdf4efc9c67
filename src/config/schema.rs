// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from convcheck.toml.

use serde::{Deserialize, Serialize};

/// The main configuration structure for convcheck.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConvConfig {
    /// General settings.
    pub settings: SettingsConfig,

    /// Convention definitions, in the order they should be listed.
    pub conventions: Vec<ConventionConfig>,
}

impl ConvConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Convention used for bare `check` inputs and `branch`.
    pub default_branch_convention: String,

    /// Convention used for `check --file` and `commits`.
    pub default_commit_convention: String,

    /// Whether the built-in conventions are loaded before the file's.
    pub include_defaults: bool,

    /// Drop `#` comment lines from commit messages before checking.
    pub strip_comments: bool,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            default_branch_convention: "branch".to_string(),
            default_commit_convention: "commit-header".to_string(),
            include_defaults: true,
            strip_comments: true,
        }
    }
}

/// What a convention is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConventionKind {
    /// Branch names.
    #[default]
    Branch,
    /// Commit messages (header line only).
    Commit,
}

impl ConventionKind {
    /// Get the string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConventionKind::Branch => "branch",
            ConventionKind::Commit => "commit",
        }
    }
}

impl std::fmt::Display for ConventionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A convention as written in the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConventionConfig {
    /// Identifier used on the command line.
    pub name: String,

    /// Whether this applies to branch names or commit messages.
    pub kind: ConventionKind,

    /// Regex the input must match.
    pub pattern: String,

    /// Shown when the input fails and no hint explains why.
    pub description: String,

    /// Maximum length in characters of the checked text.
    pub max_length: Option<usize>,

    /// Glob patterns for inputs that always pass.
    pub exempt: Vec<String>,

    /// Ordered diagnostic checks.
    pub hints: Vec<HintConfig>,
}

/// A diagnostic sub-pattern with the reason reported when it does not match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HintConfig {
    /// Regex the input is expected to match.
    pub pattern: String,

    /// Reason reported when it doesn't.
    pub reason: String,
}
