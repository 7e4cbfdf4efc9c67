// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! convcheck - branch name and commit message convention checker.
//!
//! Conventions are named regular expressions loaded from `convcheck.toml`
//! (or the built-in defaults). Each check yields a [`ValidationResult`]
//! that the [`report`] module renders for the console.
//!
//! # Example
//!
//! ```
//! use convcheck::conventions::RuleSet;
//!
//! let rules = RuleSet::builtin().unwrap();
//!
//! let ok = rules.check("feat/CRM-100-add-new-application-form", "branch").unwrap();
//! assert!(ok.passed);
//!
//! let bad = rules.check("update-stuff", "branch").unwrap();
//! assert_eq!(bad.message.as_deref(), Some("missing ticket prefix"));
//! ```

pub mod cli;
pub mod config;
pub mod conventions;
pub mod error;
pub mod git;
pub mod hooks;
pub mod report;

pub use config::ConvConfig;
pub use conventions::{Convention, RuleSet, ValidationResult};
pub use error::{ConfigError, ConvError, Result, ValidationFailure};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of convcheck.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Value vergen emits when git metadata could not be read.
    const PLACEHOLDER: &str = "VERGEN_IDEMPOTENT_OUTPUT";

    /// The git SHA at compile time (if available).
    pub fn git_sha() -> Option<&'static str> {
        known(option_env!("VERGEN_GIT_SHA"))
    }

    /// The git commit date at compile time (if available).
    pub fn git_commit_date() -> Option<&'static str> {
        known(option_env!("VERGEN_GIT_COMMIT_DATE"))
    }

    fn known(value: Option<&str>) -> Option<&str> {
        value.filter(|v| !v.is_empty() && *v != PLACEHOLDER)
    }

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (git_sha(), git_commit_date()) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }

}
