// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and merging.

use crate::error::{ConfigError, ConvError, Result};
use std::path::{Path, PathBuf};

use super::default::builtin_conventions;
use super::schema::{ConvConfig, ConventionConfig};

/// Configuration file names to search for, in order of priority.
pub const CONFIG_FILES: &[&str] = &[
    "convcheck.toml",
    ".convcheck.toml",
    ".config/convcheck.toml",
];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    if let Some(home) = dirs::home_dir() {
        for config_name in CONFIG_FILES {
            let config_path = home.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }
    }

    // XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("convcheck").join("config.toml");
        if path.exists() {
            return Some(path);
        }
    }

    None
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<ConvConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using built-in conventions");
            Ok(ConvConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<ConvConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(ConvError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConvError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<ConvConfig> {
    toml::from_str(content).map_err(|e| {
        ConvError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}

/// The conventions a configuration resolves to.
///
/// When `include_defaults` is set the built-ins come first; file entries
/// with a built-in's name replace it in place, the rest are appended in
/// file order.
pub fn effective_conventions(config: &ConvConfig) -> Vec<ConventionConfig> {
    if config.settings.include_defaults {
        merge_conventions(builtin_conventions(), config.conventions.clone())
    } else {
        config.conventions.clone()
    }
}

/// Merge two convention lists, with the overlay taking precedence by name.
///
/// Each base entry is replaced at most once; a repeated overlay name is
/// appended so the rule set can report it as a duplicate.
pub fn merge_conventions(
    base: Vec<ConventionConfig>,
    overlay: Vec<ConventionConfig>,
) -> Vec<ConventionConfig> {
    let base_len = base.len();
    let mut replaced = vec![false; base_len];
    let mut merged = base;

    for conv in overlay {
        match merged[..base_len].iter().position(|c| c.name == conv.name) {
            Some(idx) if !replaced[idx] => {
                merged[idx] = conv;
                replaced[idx] = true;
            }
            _ => merged.push(conv),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConventionKind;

    fn conv(name: &str, pattern: &str) -> ConventionConfig {
        ConventionConfig {
            name: name.to_string(),
            pattern: pattern.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_config("").unwrap();
        assert!(config.settings.include_defaults);
        assert!(config.conventions.is_empty());
    }

    #[test]
    fn test_parse_custom_config() {
        let toml = r#"
[settings]
default_branch_convention = "jira-branch"
include_defaults = false

[[conventions]]
name = "jira-branch"
kind = "branch"
pattern = "^[A-Z]+-[0-9]+/"
description = "start with the ticket"
exempt = ["main"]

[[conventions.hints]]
pattern = "^[A-Z]"
reason = "ticket must come first"
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.settings.default_branch_convention, "jira-branch");
        assert!(!config.settings.include_defaults);
        assert_eq!(config.conventions.len(), 1);
        assert_eq!(config.conventions[0].kind, ConventionKind::Branch);
        assert_eq!(config.conventions[0].exempt, vec!["main"]);
        assert_eq!(config.conventions[0].hints[0].reason, "ticket must come first");
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_config("[[conventions]\nname = ");
        assert!(matches!(
            result,
            Err(ConvError::Config(ConfigError::ParseError { .. }))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config_from(Path::new("/definitely/not/here/convcheck.toml"));
        assert!(matches!(
            result,
            Err(ConvError::Config(ConfigError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_find_config_in_parent() {
        let dir = tempfile::TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("convcheck.toml"), "").unwrap();

        let found = find_config_file_from(&nested).unwrap();
        assert_eq!(found, dir.path().join("convcheck.toml"));
    }

    #[test]
    fn test_merge_replaces_in_place() {
        let base = vec![conv("branch", "^a"), conv("commit-header", "^b")];
        let overlay = vec![conv("extra", "^x"), conv("branch", "^z")];
        let merged = merge_conventions(base, overlay);

        let names: Vec<&str> = merged.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["branch", "commit-header", "extra"]);
        assert_eq!(merged[0].pattern, "^z");
    }

    #[test]
    fn test_merge_keeps_overlay_duplicates() {
        let base = vec![conv("branch", "^a")];
        let overlay = vec![conv("branch", "^x"), conv("branch", "^y")];
        let merged = merge_conventions(base, overlay);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].pattern, "^x");
        assert_eq!(merged[1].pattern, "^y");
    }

    #[test]
    fn test_effective_without_defaults() {
        let mut config = ConvConfig::default();
        config.settings.include_defaults = false;
        config.conventions.push(conv("only", "^o"));
        let effective = effective_conventions(&config);
        assert_eq!(effective.len(), 1);
        assert_eq!(effective[0].name, "only");
    }
}
