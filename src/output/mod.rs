//! Result output: JSON file plus a plain-text digest
//!
//! The JSON file is the structured interface consumed by downstream
//! formatting/posting tooling; the text summary is a quick human-readable
//! overview of the run.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Local;

use crate::records::ScrapeResult;
use crate::ScrapeError;

/// Writes the result as pretty-printed JSON, creating parent directories
/// as needed.
pub fn write_results(result: &ScrapeResult, path: &Path) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json + "\n")?;
    Ok(())
}

/// Renders a plain-text digest of the run: per-course event counts and the
/// error list.
pub fn render_summary(result: &ScrapeResult) -> String {
    let mut per_course: BTreeMap<&str, usize> = BTreeMap::new();
    for event in &result.events {
        // Final results always carry a course name
        let course = event.course.as_deref().unwrap_or("(unknown)");
        *per_course.entry(course).or_default() += 1;
    }

    let mut summary = format!(
        "FAIRWAY-SCOUT RUN SUMMARY\nGenerated: {}\n\nRESULTS:\n• Events found: {}\n• Courses with events: {}\n• Errors: {}\n",
        Local::now().format("%B %d, %Y at %H:%M"),
        result.events.len(),
        per_course.len(),
        result.errors.len(),
    );

    if !per_course.is_empty() {
        summary.push_str("\nCOURSES WITH EVENTS:\n");
        for (course, count) in &per_course {
            summary.push_str(&format!("• {course}: {count} events\n"));
        }
    } else {
        summary.push_str("\nNo events found this scan.\n");
    }

    if !result.errors.is_empty() {
        summary.push_str("\nISSUES ENCOUNTERED:\n");
        for error in &result.errors {
            match &error.url {
                Some(url) => summary.push_str(&format!("• {} ({}): {}\n", error.course, url, error.error)),
                None => summary.push_str(&format!("• {}: {}\n", error.course, error.error)),
            }
        }
    }

    summary
}

/// Writes the plain-text digest to a file
pub fn write_summary(result: &ScrapeResult, path: &Path) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, render_summary(result))?;
    Ok(())
}
