//! Linter report parsing.
//!
//! ESLint's `stylish` formatter ends with a summary such as
//! `✖ 5 problems (3 errors, 2 warnings)`; Stylelint's `string` formatter is
//! judged by whether the word `error` appears anywhere in the report.

use regex::Regex;
use std::sync::OnceLock;

fn stylish_summary() -> &'static Regex {
    static SUMMARY: OnceLock<Regex> = OnceLock::new();
    SUMMARY.get_or_init(|| {
        Regex::new(r"\d+ problems? \((?P<errors>\d+) errors?, (?P<warnings>\d+) warnings?\)")
            .expect("static regex")
    })
}

/// Number of errors reported in an ESLint `stylish` summary.
///
/// Returns `None` when the report has no summary line, which is the case
/// when every file is clean.
pub fn parse_stylish_errors(report: &str) -> Option<usize> {
    stylish_summary()
        .captures_iter(report)
        .filter_map(|c| c.name("errors")?.as_str().parse::<usize>().ok())
        .last()
}

/// Whether a Stylelint `string` report flags an error.
pub fn report_has_error(report: &str) -> bool {
    report.contains("error")
}
