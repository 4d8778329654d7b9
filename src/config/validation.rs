use url::Url;

use crate::config::types::{Course, ScrapeOptions};
use crate::ConfigError;

/// Validates runtime options before a run starts
pub fn validate_options(options: &ScrapeOptions) -> Result<(), ConfigError> {
    if options.concurrency < 1 || options.concurrency > 64 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 64, got {}",
            options.concurrency
        )));
    }

    if options.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout must be >= 1 second, got {}s",
            options.timeout_secs
        )));
    }

    Ok(())
}

/// Sanity-checks the normalized course list.
///
/// Malformed URLs are warned about but not fatal: they surface later as
/// per-URL error records instead of aborting the run before any network
/// activity. Only structural problems (empty names, duplicates) fail here.
pub fn validate_courses(courses: &[Course]) -> Result<(), ConfigError> {
    let mut seen_names = std::collections::HashSet::new();

    for course in courses {
        if course.name.is_empty() {
            return Err(ConfigError::Validation(
                "course name cannot be empty".to_string(),
            ));
        }

        if !seen_names.insert(course.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate course name: '{}'",
                course.name
            )));
        }

        for url in &course.urls {
            match Url::parse(url) {
                Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
                _ => {
                    tracing::warn!(
                        "Course {} has a malformed URL '{}'; it will fail at fetch time",
                        course.name,
                        url
                    );
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(name: &str, urls: Vec<&str>) -> Course {
        Course {
            name: name.to_string(),
            urls: urls.into_iter().map(String::from).collect(),
            location: None,
            phone: None,
            parser: "generic_events".to_string(),
            extra: Default::default(),
        }
    }

    #[test]
    fn test_validate_options_bounds() {
        assert!(validate_options(&ScrapeOptions::default()).is_ok());

        let zero_workers = ScrapeOptions {
            concurrency: 0,
            ..ScrapeOptions::default()
        };
        assert!(validate_options(&zero_workers).is_err());

        let zero_timeout = ScrapeOptions {
            timeout_secs: 0,
            ..ScrapeOptions::default()
        };
        assert!(validate_options(&zero_timeout).is_err());
    }

    #[test]
    fn test_validate_courses_accepts_good_list() {
        let courses = vec![
            course("A", vec!["https://a.example.com/"]),
            course("B", vec!["https://b.example.com/"]),
        ];
        assert!(validate_courses(&courses).is_ok());
    }

    #[test]
    fn test_validate_courses_rejects_duplicates() {
        let courses = vec![
            course("A", vec!["https://a.example.com/"]),
            course("A", vec!["https://other.example.com/"]),
        ];
        assert!(validate_courses(&courses).is_err());
    }

    #[test]
    fn test_validate_courses_rejects_empty_name() {
        let courses = vec![course("", vec!["https://a.example.com/"])];
        assert!(validate_courses(&courses).is_err());
    }

    #[test]
    fn test_malformed_url_is_not_fatal() {
        let courses = vec![course("A", vec!["not a url"])];
        assert!(validate_courses(&courses).is_ok());
    }
}
