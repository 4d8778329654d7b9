//! Output record types
//!
//! Events and errors are accumulated during a run and returned as part of a
//! [`ScrapeResult`]. Records are created once and never mutated afterwards,
//! except for the orchestrator filling in default fields on freshly parsed
//! events.

use serde::Serialize;

use crate::config::Course;

/// A structured candidate "program/event" extracted from page text.
///
/// Parsers fill in what they can extract; the orchestrator supplies `course`,
/// `location`, and `source_url` defaults for any field the parser left unset.
/// Optional fields are omitted from JSON output rather than null-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    /// Short human-readable label
    pub title: String,

    /// Extracted date string, unnormalized (e.g. "Aug 12, 2025" or "09/21/2025")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// The source text span the record was derived from, capped at 500 characters
    pub raw: String,

    /// Course name; guaranteed present in a final [`ScrapeResult`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,

    /// Course location passthrough
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// URL the record was extracted from; guaranteed present in a final result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Matched time-of-day strings
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub times: Vec<String>,

    /// Matched price strings
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub prices: Vec<String>,

    /// Matched age/skill-level strings
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ages: Vec<String>,

    /// Matched contact strings (phone numbers, emails)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<String>,
}

impl EventRecord {
    /// Creates a record with only the parser-level fields set
    pub fn new(title: String, date: Option<String>, raw: String) -> Self {
        Self {
            title,
            date,
            raw,
            course: None,
            location: None,
            source_url: None,
            times: Vec::new(),
            prices: Vec::new(),
            ages: Vec::new(),
            contacts: Vec::new(),
        }
    }

    /// Fills in `course`, `location`, and `source_url` from the configured
    /// course if the parser did not already set them. Never overwrites a
    /// field a parser set explicitly.
    pub fn fill_defaults(&mut self, course: &Course, source_url: &str) {
        if self.course.is_none() {
            self.course = Some(course.name.clone());
        }
        if self.location.is_none() {
            self.location = course.location.clone();
        }
        if self.source_url.is_none() {
            self.source_url = Some(source_url.to_string());
        }
    }
}

/// A failure to process a course or one of its URLs.
///
/// `url` is present when the failure is URL-specific and absent when a whole
/// course job failed. Retries happen inside the HTTP layer before an
/// `ErrorRecord` is ever produced.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorRecord {
    pub course: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Short diagnostic string
    pub error: String,
}

/// The orchestrator's terminal output: deduplicated events plus all errors
/// accumulated during the run. Immutable once returned.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeResult {
    pub events: Vec<EventRecord>,
    pub errors: Vec<ErrorRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Course;

    fn test_course() -> Course {
        Course {
            name: "Demo Course".to_string(),
            urls: vec!["https://example.com/".to_string()],
            location: Some("Truckee".to_string()),
            phone: None,
            parser: "generic_events".to_string(),
            extra: Default::default(),
        }
    }

    #[test]
    fn test_fill_defaults_sets_absent_fields() {
        let mut record = EventRecord::new("Member-Guest".to_string(), None, "raw".to_string());
        record.fill_defaults(&test_course(), "https://example.com/events");

        assert_eq!(record.course.as_deref(), Some("Demo Course"));
        assert_eq!(record.location.as_deref(), Some("Truckee"));
        assert_eq!(record.source_url.as_deref(), Some("https://example.com/events"));
    }

    #[test]
    fn test_fill_defaults_never_overwrites() {
        let mut record = EventRecord::new("Member-Guest".to_string(), None, "raw".to_string());
        record.course = Some("Other Course".to_string());
        record.source_url = Some("https://other.example/".to_string());
        record.fill_defaults(&test_course(), "https://example.com/events");

        assert_eq!(record.course.as_deref(), Some("Other Course"));
        assert_eq!(record.source_url.as_deref(), Some("https://other.example/"));
        // location was absent, so the course default applies
        assert_eq!(record.location.as_deref(), Some("Truckee"));
    }

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let record = EventRecord::new("Clinic".to_string(), None, "raw".to_string());
        let json = serde_json::to_string(&record).unwrap();

        assert!(!json.contains("\"date\""));
        assert!(!json.contains("\"times\""));
        assert!(!json.contains("\"course\""));
        assert!(json.contains("\"title\":\"Clinic\""));
    }
}
