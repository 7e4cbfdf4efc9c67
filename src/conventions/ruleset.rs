// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The ordered set of loaded conventions.

use crate::config::{
    builtin_conventions, effective_conventions, ConvConfig, ConventionConfig, ConventionKind,
};
use crate::error::{ConfigError, Result};
use crate::git;
use std::collections::HashSet;

use super::convention::Convention;
use super::validator::{validate_with, CheckOptions, ValidationResult};

/// Conventions in load order, plus the defaults used when none is named.
#[derive(Debug, Clone)]
pub struct RuleSet {
    conventions: Vec<Convention>,
    options: CheckOptions,
    default_branch: String,
    default_commit: String,
}

impl RuleSet {
    /// Rule set made of the built-in conventions only.
    pub fn builtin() -> std::result::Result<Self, ConfigError> {
        Self::from_conventions(&builtin_conventions())
    }

    /// Compile the conventions a configuration resolves to.
    pub fn from_config(config: &ConvConfig) -> std::result::Result<Self, ConfigError> {
        let mut set = Self::from_conventions(&effective_conventions(config))?;
        set.options.strip_comments = config.settings.strip_comments;
        set.default_branch = config.settings.default_branch_convention.clone();
        set.default_commit = config.settings.default_commit_convention.clone();
        Ok(set)
    }

    /// Compile a static list of conventions, keeping their order.
    pub fn from_conventions(
        configs: &[ConventionConfig],
    ) -> std::result::Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        let mut conventions = Vec::with_capacity(configs.len());

        for config in configs {
            if !seen.insert(config.name.as_str()) {
                return Err(ConfigError::DuplicateConvention {
                    name: config.name.clone(),
                });
            }
            conventions.push(Convention::compile(config)?);
        }

        tracing::debug!("Loaded {} conventions", conventions.len());

        Ok(Self {
            conventions,
            options: CheckOptions::default(),
            default_branch: "branch".to_string(),
            default_commit: "commit-header".to_string(),
        })
    }

    /// Number of conventions.
    pub fn len(&self) -> usize {
        self.conventions.len()
    }

    /// Whether no conventions are loaded.
    pub fn is_empty(&self) -> bool {
        self.conventions.is_empty()
    }

    /// Iterate in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Convention> {
        self.conventions.iter()
    }

    /// Convention names in load order.
    pub fn names(&self) -> Vec<&str> {
        self.conventions.iter().map(|c| c.name()).collect()
    }

    /// Look up a convention by name.
    pub fn get(&self, name: &str) -> std::result::Result<&Convention, ConfigError> {
        self.conventions
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| ConfigError::UnknownConvention {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// Name of the convention used when none is given for a kind.
    pub fn default_name(&self, kind: ConventionKind) -> &str {
        match kind {
            ConventionKind::Branch => &self.default_branch,
            ConventionKind::Commit => &self.default_commit,
        }
    }

    /// Input preparation options.
    pub fn options(&self) -> CheckOptions {
        self.options
    }

    /// Check an input against the named convention.
    pub fn check(&self, input: &str, name: &str) -> Result<ValidationResult> {
        let convention = self.get(name)?;
        Ok(validate_with(input, convention, self.options))
    }

    /// Check the current branch of the repository in the working directory.
    pub fn check_current_branch(&self, name: Option<&str>) -> Result<ValidationResult> {
        let name = name.unwrap_or_else(|| self.default_name(ConventionKind::Branch));
        let convention = self.get(name)?;
        let branch = git::get_branch_name()?;
        Ok(validate_with(&branch, convention, self.options))
    }

    /// Check commit headers for a revision or `A..B` range.
    pub fn check_commits(&self, range: &str, name: Option<&str>) -> Result<Vec<ValidationResult>> {
        let name = name.unwrap_or_else(|| self.default_name(ConventionKind::Commit));
        let convention = self.get(name)?;
        let commits = git::get_commit_range(range)?;

        Ok(commits
            .into_iter()
            .map(|(oid, message)| {
                validate_with(&message, convention, self.options)
                    .with_source(&oid[..7.min(oid.len())])
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::error::ConvError;

    #[test]
    fn test_builtin_order() {
        let set = RuleSet::builtin().unwrap();
        assert_eq!(set.names(), vec!["branch", "commit-header"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_check_examples() {
        let set = RuleSet::builtin().unwrap();
        assert!(set
            .check("feat/CRM-100-add-new-application-form", "branch")
            .unwrap()
            .passed);

        let result = set.check("update-stuff", "branch").unwrap();
        assert!(!result.passed);
        assert_eq!(result.message.as_deref(), Some("missing ticket prefix"));
    }

    #[test]
    fn test_unknown_convention() {
        let set = RuleSet::builtin().unwrap();
        let err = set.check("x", "nope").unwrap_err();
        match err {
            ConvError::Config(ConfigError::UnknownConvention { name, available }) => {
                assert_eq!(name, "nope");
                assert_eq!(available, "branch, commit-header");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_config_order_and_override() {
        let config = parse_config(
            r#"
[settings]
default_branch_convention = "short"

[[conventions]]
name = "short"
pattern = "^[a-z]{1,10}$"

[[conventions]]
name = "branch"
pattern = "^b/"
"#,
        )
        .unwrap();
        let set = RuleSet::from_config(&config).unwrap();
        assert_eq!(set.names(), vec!["branch", "commit-header", "short"]);
        assert_eq!(set.get("branch").unwrap().pattern(), "^b/");
        assert_eq!(set.default_name(ConventionKind::Branch), "short");
        assert_eq!(set.default_name(ConventionKind::Commit), "commit-header");
    }

    #[test]
    fn test_invalid_pattern_fails_load() {
        let config = parse_config(
            r#"
[[conventions]]
name = "bad"
pattern = "feat/(unclosed"
"#,
        )
        .unwrap();
        let err = RuleSet::from_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref name, .. } if name == "bad"));
    }

    #[test]
    fn test_duplicate_names() {
        let config = parse_config(
            r#"
[settings]
include_defaults = false

[[conventions]]
name = "a"
pattern = "^a"

[[conventions]]
name = "a"
pattern = "^b"
"#,
        )
        .unwrap();
        assert!(matches!(
            RuleSet::from_config(&config),
            Err(ConfigError::DuplicateConvention { .. })
        ));
    }

    #[test]
    fn test_strip_comments_setting() {
        let config = parse_config(
            r#"
[settings]
strip_comments = false

[[conventions]]
name = "issue"
kind = "commit"
pattern = "^#[0-9]+ "
"#,
        )
        .unwrap();
        let set = RuleSet::from_config(&config).unwrap();
        assert!(set.check("#12 fix crash\n", "issue").unwrap().passed);
    }

    #[test]
    fn test_commit_history() {
        let dir = tempfile::TempDir::new().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        let sig = git2::Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let first = repo
            .commit(Some("HEAD"), &sig, &sig, "feat: first", &tree, &[])
            .unwrap();
        let parent = repo.find_commit(first).unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "did things", &tree, &[&parent])
            .unwrap();

        let set = RuleSet::builtin().unwrap();
        let convention = set.get("commit-header").unwrap();
        let results: Vec<_> = git::Repository::open(dir.path())
            .unwrap()
            .get_commits_in_range("HEAD~1..HEAD")
            .unwrap()
            .into_iter()
            .map(|(_, msg)| validate_with(&msg, convention, set.options()))
            .collect();

        assert_eq!(results.len(), 1);
        assert!(!results[0].passed);
        assert_eq!(results[0].message.as_deref(), Some("missing type prefix"));
    }
}
