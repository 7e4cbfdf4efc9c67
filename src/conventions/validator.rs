// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Checking inputs against conventions.

use crate::config::ConventionKind;
use crate::error::ValidationFailure;
use serde::Serialize;

use super::convention::Convention;

/// Reason reported for blank inputs.
pub const EMPTY_INPUT: &str = "empty input";

/// Input preparation options.
#[derive(Debug, Clone, Copy)]
pub struct CheckOptions {
    /// Drop `#` comment lines from commit messages.
    pub strip_comments: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            strip_comments: true,
        }
    }
}

/// Outcome of checking one input against one convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// The text that was checked (branch name or commit header).
    pub input: String,
    /// Name of the convention.
    pub convention: String,
    /// Whether the input satisfied the convention.
    pub passed: bool,
    /// Why it failed.
    pub message: Option<String>,
    /// Where the input came from, e.g. a commit SHA.
    pub source: Option<String>,
}

impl ValidationResult {
    /// A passing result.
    pub fn pass(input: impl Into<String>, convention: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            convention: convention.into(),
            passed: true,
            message: None,
            source: None,
        }
    }

    /// A failing result with its reason.
    pub fn fail(
        input: impl Into<String>,
        convention: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            input: input.into(),
            convention: convention.into(),
            passed: false,
            message: Some(reason.into()),
            source: None,
        }
    }

    /// Attach a source label.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Convert into a `Result`, failing with the recorded reason.
    pub fn into_result(self) -> Result<(), ValidationFailure> {
        if self.passed {
            Ok(())
        } else {
            Err(ValidationFailure {
                input: self.input,
                convention: self.convention,
                reason: self.message.unwrap_or_default(),
            })
        }
    }
}

/// Check an input against a convention with default options.
pub fn validate(input: &str, convention: &Convention) -> ValidationResult {
    validate_with(input, convention, CheckOptions::default())
}

/// Check an input against a convention.
///
/// Pure: the result depends only on the arguments.
pub fn validate_with(
    input: &str,
    convention: &Convention,
    options: CheckOptions,
) -> ValidationResult {
    let subject = prepare_input(input, convention.kind(), options);
    let name = convention.name();

    if subject.is_empty() {
        return ValidationResult::fail(subject, name, EMPTY_INPUT);
    }

    if convention.is_exempt(&subject) {
        tracing::debug!("'{}' is exempt from '{}'", subject, name);
        return ValidationResult::pass(subject, name);
    }

    if !convention.matches(&subject) {
        let reason = convention
            .hints()
            .iter()
            .find(|hint| !hint.matches(&subject))
            .map(|hint| hint.reason())
            .unwrap_or_else(|| convention.description())
            .to_string();
        return ValidationResult::fail(subject, name, reason);
    }

    // Length is checked last so a shape problem is reported first.
    if let Some(max) = convention.max_length() {
        let len = subject.chars().count();
        if len > max {
            let reason = format!(
                "{} too long ({} > {} characters)",
                what(convention.kind()),
                len,
                max
            );
            return ValidationResult::fail(subject, name, reason);
        }
    }

    ValidationResult::pass(subject, name)
}

/// Reduce raw input to the text a convention of the given kind checks.
pub fn prepare_input(input: &str, kind: ConventionKind, options: CheckOptions) -> String {
    match kind {
        ConventionKind::Branch => {
            let trimmed = input.trim();
            trimmed
                .strip_prefix("refs/heads/")
                .unwrap_or(trimmed)
                .to_string()
        }
        ConventionKind::Commit => commit_header(input, options.strip_comments),
    }
}

/// First meaningful line of a commit message.
pub fn commit_header(message: &str, strip_comments: bool) -> String {
    message
        .lines()
        .filter(|line| !(strip_comments && line.starts_with('#')))
        .map(str::trim_end)
        .find(|line| !line.trim().is_empty())
        .unwrap_or("")
        .to_string()
}

fn what(kind: ConventionKind) -> &'static str {
    match kind {
        ConventionKind::Branch => "name",
        ConventionKind::Commit => "header",
    }
}
