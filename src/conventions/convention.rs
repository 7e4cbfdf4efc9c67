// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Compiled conventions.

use crate::config::{ConventionConfig, ConventionKind, HintConfig};
use crate::error::ConfigError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Allowed characters in convention names.
    static ref NAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_.-]+$").expect("valid name regex");
}

/// A diagnostic sub-pattern.
#[derive(Debug, Clone)]
pub struct Hint {
    pattern: Regex,
    reason: String,
}

impl Hint {
    /// The reason reported when the input does not match.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Whether the input satisfies this hint.
    pub fn matches(&self, input: &str) -> bool {
        self.pattern.is_match(input)
    }
}

/// A named rule with its pattern compiled. Immutable once built.
#[derive(Debug, Clone)]
pub struct Convention {
    name: String,
    kind: ConventionKind,
    pattern: Regex,
    description: String,
    max_length: Option<usize>,
    exempt: Vec<glob::Pattern>,
    hints: Vec<Hint>,
}

impl Convention {
    /// Compile a convention from its configuration.
    pub fn compile(config: &ConventionConfig) -> Result<Self, ConfigError> {
        if !NAME_REGEX.is_match(&config.name) {
            return Err(ConfigError::InvalidName {
                name: config.name.clone(),
            });
        }

        let pattern = compile_regex(&config.name, &config.pattern)?;

        let hints = config
            .hints
            .iter()
            .map(|HintConfig { pattern, reason }| {
                Ok(Hint {
                    pattern: compile_regex(&config.name, pattern)?,
                    reason: reason.clone(),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let exempt = config
            .exempt
            .iter()
            .map(|glob| {
                glob::Pattern::new(glob).map_err(|e| ConfigError::InvalidExempt {
                    name: config.name.clone(),
                    message: format!("'{}': {}", glob, e.msg),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let description = if config.description.trim().is_empty() {
            format!("does not match {}", config.pattern)
        } else {
            config.description.clone()
        };

        Ok(Self {
            name: config.name.clone(),
            kind: config.kind,
            pattern,
            description,
            max_length: config.max_length,
            exempt,
            hints,
        })
    }

    /// Build a convention from a bare pattern, without hints or exemptions.
    pub fn from_pattern(
        name: &str,
        kind: ConventionKind,
        pattern: &str,
        description: &str,
    ) -> Result<Self, ConfigError> {
        Self::compile(&ConventionConfig {
            name: name.to_string(),
            kind,
            pattern: pattern.to_string(),
            description: description.to_string(),
            ..Default::default()
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ConventionKind {
        self.kind
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    /// Whether the input matches the main pattern.
    pub fn matches(&self, input: &str) -> bool {
        self.pattern.is_match(input)
    }

    /// Whether the input matches one of the exempt globs.
    pub fn is_exempt(&self, input: &str) -> bool {
        self.exempt.iter().any(|glob| glob.matches(input))
    }
}

fn compile_regex(name: &str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        name: name.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_builtin() {
        for config in crate::config::builtin_conventions() {
            let conv = Convention::compile(&config).unwrap();
            assert_eq!(conv.name(), config.name);
            assert_eq!(conv.hints().len(), config.hints.len());
        }
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Convention::from_pattern("broken", ConventionKind::Branch, "feat/(", "x")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref name, .. } if name == "broken"));
    }

    #[test]
    fn test_invalid_hint_pattern() {
        let config = ConventionConfig {
            name: "b".to_string(),
            pattern: "^b".to_string(),
            hints: vec![HintConfig {
                pattern: "[".to_string(),
                reason: "never".to_string(),
            }],
            ..Default::default()
        };
        assert!(matches!(
            Convention::compile(&config),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_invalid_exempt_glob() {
        let config = ConventionConfig {
            name: "b".to_string(),
            pattern: "^b".to_string(),
            exempt: vec!["release/[".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            Convention::compile(&config),
            Err(ConfigError::InvalidExempt { .. })
        ));
    }

    #[test]
    fn test_invalid_name() {
        for name in ["", "has space", "br[anch]"] {
            let result = Convention::from_pattern(name, ConventionKind::Branch, "^b", "");
            assert!(matches!(result, Err(ConfigError::InvalidName { .. })), "{name}");
        }
    }

    #[test]
    fn test_exempt() {
        let config = ConventionConfig {
            name: "b".to_string(),
            pattern: "^feat/".to_string(),
            exempt: vec!["main".to_string(), "release/*".to_string()],
            ..Default::default()
        };
        let conv = Convention::compile(&config).unwrap();
        assert!(conv.is_exempt("main"));
        assert!(conv.is_exempt("release/1.2"));
        assert!(!conv.is_exempt("mainline"));
    }

    #[test]
    fn test_default_description() {
        let conv = Convention::from_pattern("b", ConventionKind::Branch, "^b", "  ").unwrap();
        assert_eq!(conv.description(), "does not match ^b");
    }
}
