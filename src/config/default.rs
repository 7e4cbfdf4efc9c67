// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in conventions and the example configuration.

use super::schema::{ConventionConfig, ConventionKind, HintConfig};

const BRANCH_TYPES: &str = "feat|fix|hotfix|chore|docs|refactor|test|release";
const COMMIT_TYPES: &str = "feat|fix|docs|style|refactor|perf|test|chore|build|ci|revert";

/// Maximum commit header length.
pub const MAX_HEADER_LENGTH: usize = 72;

/// Conventions available without any configuration file.
pub fn builtin_conventions() -> Vec<ConventionConfig> {
    vec![
        ConventionConfig {
            name: "branch".to_string(),
            kind: ConventionKind::Branch,
            pattern: format!(
                r"^({})/[A-Z][A-Z0-9]+-[0-9]+-[a-z0-9]+(-[a-z0-9]+)*$",
                BRANCH_TYPES
            ),
            description: "branch must look like <type>/<TICKET>-<slug>".to_string(),
            max_length: None,
            exempt: Vec::new(),
            hints: vec![
                HintConfig {
                    pattern: format!(r"^({})/[A-Z][A-Z0-9]+-[0-9]+", BRANCH_TYPES),
                    reason: "missing ticket prefix".to_string(),
                },
                HintConfig {
                    pattern: r"^[^/]+/[A-Z][A-Z0-9]+-[0-9]+-[a-z0-9]+(-[a-z0-9]+)*$".to_string(),
                    reason: "slug must be lowercase words separated by hyphens".to_string(),
                },
            ],
        },
        ConventionConfig {
            name: "commit-header".to_string(),
            kind: ConventionKind::Commit,
            pattern: format!(r"^({})(\([a-z0-9-]+\))?!?: \S.*$", COMMIT_TYPES),
            description: "header must look like <type>(<scope>): <subject>".to_string(),
            max_length: Some(MAX_HEADER_LENGTH),
            exempt: vec!["Merge *".to_string(), "Revert \"*".to_string()],
            hints: vec![
                HintConfig {
                    pattern: format!(r"^({})(\([^)]*\))?!?:", COMMIT_TYPES),
                    reason: "missing type prefix".to_string(),
                },
                HintConfig {
                    pattern: r"^[a-z]+(\([a-z0-9-]+\))?!?:".to_string(),
                    reason: "scope must be lowercase words separated by hyphens".to_string(),
                },
                HintConfig {
                    pattern: r": \S".to_string(),
                    reason: "empty subject".to_string(),
                },
            ],
        },
    ]
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# convcheck configuration
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

[settings]
default_branch_convention = "branch"
default_commit_convention = "commit-header"
# Load the built-in "branch" and "commit-header" conventions first.
# Conventions below with the same name replace them.
include_defaults = true
strip_comments = true

# Branches such as feat/CRM-100-add-new-application-form
[[conventions]]
name = "branch"
kind = "branch"
pattern = "^(feat|fix|hotfix|chore|docs)/[A-Z][A-Z0-9]+-[0-9]+-[a-z0-9]+(-[a-z0-9]+)*$"
description = "branch must look like <type>/<TICKET>-<slug>"
exempt = ["main", "develop", "release/*"]

[[conventions.hints]]
pattern = "^(feat|fix|hotfix|chore|docs)/[A-Z][A-Z0-9]+-[0-9]+"
reason = "missing ticket prefix"

[[conventions.hints]]
pattern = "^[^/]+/[A-Z][A-Z0-9]+-[0-9]+-[a-z0-9]+(-[a-z0-9]+)*$"
reason = "slug must be lowercase words separated by hyphens"

# Commit headers that must reference a ticket: "CRM-100: add application form"
[[conventions]]
name = "ticket-header"
kind = "commit"
pattern = "^[A-Z][A-Z0-9]+-[0-9]+: \\S.*$"
description = "header must start with the ticket id"
max_length = 72
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConvConfig;
    use regex::Regex;

    #[test]
    fn test_builtin_patterns_compile() {
        for conv in builtin_conventions() {
            assert!(Regex::new(&conv.pattern).is_ok(), "{}", conv.name);
            for hint in &conv.hints {
                assert!(Regex::new(&hint.pattern).is_ok(), "{}", hint.pattern);
            }
        }
    }

    #[test]
    fn test_builtin_names() {
        let names: Vec<String> = builtin_conventions().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["branch", "commit-header"]);
    }

    #[test]
    fn test_example_config_parseable() {
        let example = example_config();
        let config: ConvConfig = toml::from_str(example).expect("Example config should parse");
        assert_eq!(config.conventions.len(), 2);
        assert_eq!(config.conventions[0].hints.len(), 2);
        assert_eq!(config.conventions[1].max_length, Some(72));
    }
}
