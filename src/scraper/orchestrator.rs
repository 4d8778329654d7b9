//! Scrape orchestrator
//!
//! Drives the end-to-end run: one job per configured course, dispatched
//! up-front into a bounded pool, each job fetching its URLs in order and
//! feeding the course's parser. Jobs accumulate events and errors locally;
//! the orchestrator merges and deduplicates single-threaded after
//! collection.
//!
//! Across courses, completion order is not guaranteed. For duplicate
//! records that tie on the dedup key, "first completed job wins" — a
//! documented source of run-to-run nondeterminism in the final ordering.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::{validate_courses, validate_options, Course, ScrapeOptions};
use crate::parsers;
use crate::records::{ErrorRecord, EventRecord, ScrapeResult};
use crate::scraper::HttpClient;
use crate::ScrapeError;

/// The scrape orchestrator: configured courses plus the shared HTTP client.
pub struct Scraper {
    courses: Vec<Course>,
    client: Arc<HttpClient>,
    concurrency: usize,
}

impl Scraper {
    /// Creates an orchestrator for the given course list.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Config`] for out-of-range options or a
    /// structurally invalid course list, and [`ScrapeError::Reqwest`] if
    /// the HTTP client cannot be built. No network activity happens here.
    pub fn new(courses: Vec<Course>, options: &ScrapeOptions) -> Result<Self, ScrapeError> {
        validate_options(options)?;
        validate_courses(&courses)?;

        let client = Arc::new(HttpClient::new(options)?);

        Ok(Self {
            courses,
            client,
            concurrency: options.concurrency,
        })
    }

    /// Runs the full scrape and returns the terminal result.
    ///
    /// The run always completes: per-URL and per-course failures degrade
    /// into the result's `errors` list, and an all-failures run returns
    /// empty events rather than an error.
    pub async fn run(&self) -> ScrapeResult {
        tracing::info!("Starting scrape of {} courses", self.courses.len());
        let start_time = std::time::Instant::now();

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut jobs = JoinSet::new();
        let mut job_courses: HashMap<tokio::task::Id, String> = HashMap::new();

        for course in self.courses.iter().cloned() {
            let client = Arc::clone(&self.client);
            let semaphore = Arc::clone(&semaphore);
            let name = course.name.clone();

            let handle = jobs.spawn(async move {
                // Bounds simultaneous outbound requests across courses
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("semaphore closed while jobs are running");
                scrape_course(&client, &course).await
            });
            job_courses.insert(handle.id(), name);
        }

        let mut all_events = Vec::new();
        let mut errors = Vec::new();

        while let Some(joined) = jobs.join_next_with_id().await {
            match joined {
                Ok((_id, (events, course_errors))) => {
                    all_events.extend(events);
                    errors.extend(course_errors);
                }
                Err(join_err) => {
                    // A panicked job is recovered here, keyed by course only
                    let course = job_courses
                        .get(&join_err.id())
                        .cloned()
                        .unwrap_or_default();
                    tracing::error!("Unhandled course error for {}: {}", course, join_err);
                    errors.push(ErrorRecord {
                        course,
                        url: None,
                        error: join_err.to_string(),
                    });
                }
            }
        }

        let events = dedup_events(all_events);

        tracing::info!(
            "Scrape completed: {} events, {} errors in {:?}",
            events.len(),
            errors.len(),
            start_time.elapsed()
        );

        ScrapeResult { events, errors }
    }
}

/// Scrapes one course: resolve its parser, fetch each URL in config order,
/// parse, and fill record defaults.
///
/// All of a course's URLs are attempted and unioned; a single URL failure
/// is recorded and never aborts the course. An unknown parser name logs an
/// error and yields no events (and no error record).
async fn scrape_course(
    client: &HttpClient,
    course: &Course,
) -> (Vec<EventRecord>, Vec<ErrorRecord>) {
    let Some(parser) = parsers::lookup(&course.parser) else {
        tracing::error!(
            "Parser not found: {} (course={})",
            course.parser,
            course.name
        );
        return (Vec::new(), Vec::new());
    };

    let mut events = Vec::new();
    let mut errors = Vec::new();

    for url in &course.urls {
        match client.get_text(url).await {
            Ok(html) => {
                let mut parsed = parser(course, &html, url);
                for record in &mut parsed {
                    record.fill_defaults(course, url);
                }
                tracing::debug!("{}: {} events from {}", course.name, parsed.len(), url);
                events.extend(parsed);
            }
            Err(e) => {
                tracing::error!("Error scraping {} ({}): {}", course.name, url, e);
                errors.push(ErrorRecord {
                    course: course.name.clone(),
                    url: Some(url.clone()),
                    error: e.to_string(),
                });
            }
        }
    }

    (events, errors)
}

/// Deduplicates by the composite key (course, title, date, source_url).
/// First occurrence wins; insertion order is otherwise preserved.
fn dedup_events(events: Vec<EventRecord>) -> Vec<EventRecord> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for event in events {
        let key = (
            event.course.clone(),
            event.title.clone(),
            event.date.clone(),
            event.source_url.clone(),
        );
        if seen.insert(key) {
            unique.push(event);
        }
    }

    unique
}
