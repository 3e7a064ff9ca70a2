//! Start and end-of-run banners.

use appbuild_core::ProjectMetadata;
use appbuild_tools::format_timestamp;
use chrono::{DateTime, Local};
use std::time::Duration;

const ALERT: &str = "\x1b[30;101m";
const INFO: &str = "\x1b[36m";
const SUCCESS: &str = "\x1b[30;42m";
const RESET: &str = "\x1b[0m";

/// Seconds with millisecond precision, e.g. `2.048`.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.3}", elapsed.as_secs_f64())
}

/// Banner printed once the metadata is loaded.
pub fn start_banner(metadata: &ProjectMetadata, at: &DateTime<Local>) -> String {
    format!(
        "{ALERT}Start build of {} - {} - {}{RESET}",
        metadata.name,
        metadata.version,
        format_timestamp(at)
    )
}

/// Banner printed after every task succeeded.
pub fn success_banner(metadata: &ProjectMetadata, elapsed: Duration, at: &DateTime<Local>) -> String {
    format!(
        "{INFO}Time taken {} seconds{RESET}\n{SUCCESS}{} - {} - build {} - {}{RESET}",
        format_elapsed(elapsed),
        metadata.name,
        metadata.version,
        metadata.build_number,
        format_timestamp(at)
    )
}

/// Banner printed when the run stopped on an error.
pub fn failure_banner(elapsed: Duration) -> String {
    format!(
        "{ALERT}Build canceled after {} seconds - errors occurs{RESET}",
        format_elapsed(elapsed)
    )
}
