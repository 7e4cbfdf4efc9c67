// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Formatting of validation results.
//!
//! Text lines look like
//!
//! ```text
//! PASS [branch] "feat/CRM-100-add-new-application-form"
//! FAIL a1b2c3d [commit-header] "update stuff": missing type prefix
//! ```
//!
//! The input is written as a quoted string so [`parse_line`] can read any
//! line back, colours included.

use crate::conventions::ValidationResult;
use console::style;

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON output for machine parsing
    Json,
}

const PASS: &str = "PASS";
const FAIL: &str = "FAIL";

/// Formats results for the console.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    format: OutputFormat,
    color: bool,
}

impl Reporter {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    /// Render results, followed by a summary line in text mode when there
    /// is more than one.
    pub fn render(&self, results: &[ValidationResult]) -> String {
        match self.format {
            OutputFormat::Json => format_json(results),
            OutputFormat::Text => {
                let mut out: Vec<String> = results
                    .iter()
                    .map(|r| format_result(r, self.color))
                    .collect();
                if results.len() > 1 {
                    out.push(summary(results));
                }
                out.join("\n")
            }
        }
    }
}

/// Format one result as a single line.
pub fn format_result(result: &ValidationResult, color: bool) -> String {
    let status = if result.passed {
        style(PASS).green().bold()
    } else {
        style(FAIL).red().bold()
    }
    .force_styling(color);

    let mut line = format!("{} ", status);

    if let Some(ref source) = result.source {
        line.push_str(&format!("{} ", style(source).cyan().force_styling(color)));
    }

    line.push_str(&format!(
        "[{}] {:?}",
        style(&result.convention).dim().force_styling(color),
        result.input
    ));

    if let Some(ref message) = result.message {
        line.push_str(&format!(": {}", style(message).yellow().force_styling(color)));
    }

    line
}

/// Format results as a JSON array.
pub fn format_json(results: &[ValidationResult]) -> String {
    serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string())
}

/// `N checked, P passed, F failed`.
pub fn summary(results: &[ValidationResult]) -> String {
    let passed = results.iter().filter(|r| r.passed).count();
    format!(
        "{} checked, {} passed, {} failed",
        results.len(),
        passed,
        results.len() - passed
    )
}

/// A result line read back from text output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub passed: bool,
    pub source: Option<String>,
    pub convention: String,
    pub input: String,
    pub reason: Option<String>,
}

impl From<ParsedLine> for ValidationResult {
    fn from(line: ParsedLine) -> Self {
        ValidationResult {
            input: line.input,
            convention: line.convention,
            passed: line.passed,
            message: line.reason,
            source: line.source,
        }
    }
}

/// Parse a line produced by [`format_result`]. Returns `None` for anything
/// else, such as the summary line.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let plain = console::strip_ansi_codes(line);
    let (status, rest) = plain.split_once(' ')?;
    let passed = match status {
        PASS => true,
        FAIL => false,
        _ => return None,
    };

    let (source, rest) = if rest.starts_with('[') {
        (None, rest)
    } else {
        let (source, rest) = rest.split_once(' ')?;
        (Some(source.to_string()), rest)
    };

    let (convention, rest) = rest.strip_prefix('[')?.split_once("] ")?;
    let (input, rest) = read_quoted(rest)?;

    let reason = match rest.strip_prefix(": ") {
        Some(reason) => Some(reason.to_string()),
        None if rest.is_empty() => None,
        None => return None,
    };

    Some(ParsedLine {
        passed,
        source,
        convention: convention.to_string(),
        input,
        reason,
    })
}

/// Read a `{:?}`-quoted string, returning it unescaped plus the remainder.
fn read_quoted(s: &str) -> Option<(String, &str)> {
    let mut chars = s.strip_prefix('"')?.char_indices();
    let mut out = String::new();

    while let Some((idx, c)) = chars.next() {
        match c {
            '"' => return Some((out, &s[idx + 2..])),
            '\\' => {
                let (_, esc) = chars.next()?;
                match esc {
                    'n' => out.push('\n'),
                    'r' => out.push('\r'),
                    't' => out.push('\t'),
                    '0' => out.push('\0'),
                    '\\' | '"' | '\'' => out.push(esc),
                    'u' => {
                        let (_, open) = chars.next()?;
                        if open != '{' {
                            return None;
                        }
                        let mut hex = String::new();
                        loop {
                            let (_, h) = chars.next()?;
                            if h == '}' {
                                break;
                            }
                            hex.push(h);
                        }
                        out.push(char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?);
                    }
                    _ => return None,
                }
            }
            _ => out.push(c),
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing() -> ValidationResult {
        ValidationResult::fail("update-stuff", "branch", "missing ticket prefix")
    }

    #[test]
    fn test_format_pass() {
        let result = ValidationResult::pass("feat/CRM-100-add-new-application-form", "branch");
        assert_eq!(
            format_result(&result, false),
            r#"PASS [branch] "feat/CRM-100-add-new-application-form""#
        );
    }

    #[test]
    fn test_format_fail_with_source() {
        let result = failing().with_source("a1b2c3d");
        assert_eq!(
            format_result(&result, false),
            r#"FAIL a1b2c3d [branch] "update-stuff": missing ticket prefix"#
        );
    }

    #[test]
    fn test_round_trip() {
        let results = vec![
            ValidationResult::pass("feat/CRM-100-add-new-application-form", "branch"),
            failing(),
            ValidationResult::fail("feat: say \"hi\": now", "commit-header", "empty subject")
                .with_source("0123abc"),
            ValidationResult::fail("tab\there \u{7}", "commit-header", "missing type prefix"),
            ValidationResult::pass("fix: ünïcödé", "commit-header"),
        ];

        for color in [false, true] {
            for result in &results {
                let line = format_result(result, color);
                let parsed: ValidationResult = parse_line(&line).unwrap().into();
                assert_eq!(&parsed, result, "{}", line);
            }
        }
    }

    #[test]
    fn test_parse_rejects_other_lines() {
        assert!(parse_line("2 checked, 1 passed, 1 failed").is_none());
        assert!(parse_line("").is_none());
        assert!(parse_line(r#"PASS [branch] unquoted"#).is_none());
        assert!(parse_line(r#"FAIL [branch] "x" trailing"#).is_none());
    }

    #[test]
    fn test_summary() {
        let results = vec![failing(), ValidationResult::pass("main", "branch")];
        assert_eq!(summary(&results), "2 checked, 1 passed, 1 failed");
    }

    #[test]
    fn test_render_text_with_summary() {
        let reporter = Reporter::new(OutputFormat::Text, false);
        let one = reporter.render(&[failing()]);
        assert_eq!(one.lines().count(), 1);

        let two = reporter.render(&[failing(), failing()]);
        assert_eq!(two.lines().last(), Some("2 checked, 0 passed, 2 failed"));
    }

    #[test]
    fn test_render_json() {
        let reporter = Reporter::new(OutputFormat::Json, true);
        let json: serde_json::Value =
            serde_json::from_str(&reporter.render(&[failing()])).unwrap();
        assert_eq!(json[0]["input"], "update-stuff");
        assert_eq!(json[0]["passed"], false);
        assert_eq!(json[0]["message"], "missing ticket prefix");
        assert!(json[0]["source"].is_null());
    }
}
