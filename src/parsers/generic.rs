//! Generic event parser for unknown/unstructured course sites
//!
//! This is a best-effort strategy: it walks common "event" structures
//! (event-class elements, table rows, list items containing a date-like
//! string), normalizes their text, and derives a title, a date, and the
//! structured attribute sets from each candidate. Site-specific parsers can
//! be registered for courses where this is too coarse.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::config::Course;
use crate::parsers::rules::ExtractionRules;
use crate::records::EventRecord;

/// Candidates shorter than this are too short to describe an event
const MIN_CANDIDATE_LEN: usize = 12;

/// Cap on the raw text carried by a record
const MAX_RAW_LEN: usize = 500;

/// Elements whose class names commonly mark event listings
const EVENT_SELECTORS: &str = ".event, .events, .list-event, .event-item, li.event, article.event";

/// First-match date extraction: numeric slash dates or month-name dates,
/// abbreviations allowed
fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(\b\d{1,2}/\d{1,2}/\d{2,4}\b|\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{1,2}(?:,\s*\d{4})?)",
        )
        .expect("hard-coded date pattern is valid")
    })
}

/// Looser date hint used only to pick candidate list items
fn date_hint_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(\d{1,2}/\d{1,2}/\d{2,4}|jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)")
            .expect("hard-coded date hint pattern is valid")
    })
}

/// Parses a page of HTML into event records.
///
/// Pure function: identical `(course, html, url)` inputs produce identical
/// output sequences. Malformed HTML degrades to fewer or no matches; a page
/// with no candidates yields an empty vec, never an error.
///
/// Candidates sharing an identical (title, date) pair within one page are
/// collapsed to the first occurrence.
pub fn parse_generic_events(_course: &Course, html: &str, _source_url: &str) -> Vec<EventRecord> {
    let document = Html::parse_document(html);

    let candidates = collect_candidates(&document);

    let rules = ExtractionRules::standard();
    let mut seen: HashSet<(String, Option<String>)> = HashSet::new();
    let mut events = Vec::new();

    for text in candidates {
        if text.chars().count() < MIN_CANDIDATE_LEN {
            continue;
        }

        let date = date_re()
            .find(&text)
            .map(|m| m.as_str().to_string());

        let title = derive_title(&text);

        if !seen.insert((title.clone(), date.clone())) {
            continue;
        }

        let raw: String = text.chars().take(MAX_RAW_LEN).collect();
        let mut record = EventRecord::new(title, date, raw);
        rules.apply(&text, &mut record);
        events.push(record);
    }

    events
}

/// Collects candidate text spans in document order per selector group:
/// event-class elements, then table rows, then list items whose text
/// contains a date-like string.
fn collect_candidates(document: &Html) -> Vec<String> {
    let mut candidates = Vec::new();

    if let Ok(selector) = Selector::parse(EVENT_SELECTORS) {
        for element in document.select(&selector) {
            candidates.push(element_text(&element));
        }
    }

    if let Ok(selector) = Selector::parse("table tr") {
        for element in document.select(&selector) {
            candidates.push(element_text(&element));
        }
    }

    if let Ok(selector) = Selector::parse("li") {
        for element in document.select(&selector) {
            let text = element_text(&element);
            if date_hint_re().is_match(&text) {
                candidates.push(text);
            }
        }
    }

    candidates
}

/// Joins an element's text nodes with spaces and normalizes whitespace
fn element_text(element: &ElementRef) -> String {
    clean_text(&element.text().collect::<Vec<_>>().join(" "))
}

/// Collapses runs of whitespace to single spaces and trims
fn clean_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Derives a title from candidate text: the substring before the first
/// `" - "` or `" | "` delimiter, else the first 10 whitespace-separated
/// tokens.
fn derive_title(text: &str) -> String {
    let title = if let Some((before, _)) = text.split_once(" - ") {
        before.to_string()
    } else if let Some((before, _)) = text.split_once(" | ") {
        before.to_string()
    } else {
        text.split_whitespace()
            .take(10)
            .collect::<Vec<_>>()
            .join(" ")
    };

    let title = clean_text(&title);
    if title.is_empty() {
        "Event".to_string()
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_course() -> Course {
        Course {
            name: "Demo".to_string(),
            urls: vec![],
            location: None,
            phone: None,
            parser: "generic_events".to_string(),
            extra: Default::default(),
        }
    }

    fn parse(html: &str) -> Vec<EventRecord> {
        parse_generic_events(&test_course(), html, "https://example.com/")
    }

    #[test]
    fn test_event_list_smoke() {
        let html = r#"
        <ul class="events">
            <li class="event"><strong>Member-Guest</strong> - Aug 12, 2025</li>
            <li class="event">Club Championship - 09/21/2025</li>
        </ul>
        "#;

        let events = parse(html);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "Member-Guest");
        assert_eq!(events[0].date.as_deref(), Some("Aug 12, 2025"));
        assert_eq!(events[1].title, "Club Championship");
        assert_eq!(events[1].date.as_deref(), Some("09/21/2025"));
    }

    #[test]
    fn test_page_with_no_candidates_is_empty() {
        let html = "<html><body><p>Welcome to our golf course.</p></body></html>";
        assert!(parse(html).is_empty());
    }

    #[test]
    fn test_malformed_html_does_not_panic() {
        let html = "<ul><li class=\"event\">Junior Camp - Jul 4<li><table><tr><td>";
        let _ = parse(html);
    }

    #[test]
    fn test_short_candidates_discarded() {
        let html = r#"<div class="event">Too short</div>"#;
        assert!(parse(html).is_empty());
    }

    #[test]
    fn test_raw_capped_at_500_chars() {
        let long = "x".repeat(2000);
        let html = format!(r#"<div class="event">Big Tournament - {long}</div>"#);
        let events = parse(&html);
        assert_eq!(events.len(), 1);
        assert!(events[0].raw.chars().count() <= 500);
    }

    #[test]
    fn test_duplicate_title_date_pairs_collapsed() {
        let html = r#"
        <div class="event">Twilight League - 06/01/2025</div>
        <div class="event">Twilight League - 06/01/2025</div>
        "#;
        let events = parse(html);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_pipe_delimiter_title() {
        let html = r#"<div class="event">Demo Day | May 3, 2025 at the range</div>"#;
        let events = parse(html);
        assert_eq!(events[0].title, "Demo Day");
        assert_eq!(events[0].date.as_deref(), Some("May 3, 2025"));
    }

    #[test]
    fn test_missing_date_leaves_field_unset() {
        let html = r#"<div class="event">Weekly nine and dine league night</div>"#;
        let events = parse(html);
        assert_eq!(events.len(), 1);
        assert!(events[0].date.is_none());
    }

    #[test]
    fn test_title_falls_back_to_first_ten_tokens() {
        let html = r#"<div class="event">one two three four five six seven eight nine ten eleven twelve</div>"#;
        let events = parse(html);
        assert_eq!(
            events[0].title,
            "one two three four five six seven eight nine ten"
        );
    }

    #[test]
    fn test_table_rows_are_candidates() {
        let html = r#"
        <table>
            <tr><td>Couples Scramble</td><td>08/09/2025</td><td>Shotgun start</td></tr>
        </table>
        "#;
        let events = parse(html);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date.as_deref(), Some("08/09/2025"));
    }

    #[test]
    fn test_list_items_need_date_hint() {
        let html = r#"
        <ul>
            <li>Directions to the clubhouse and parking</li>
            <li>Junior clinic begins August 14 at the learning center</li>
        </ul>
        "#;
        let events = parse(html);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date.as_deref(), Some("August 14"));
    }

    #[test]
    fn test_attribute_sets_extracted() {
        let html = r#"<div class="event">Junior Golf Camp - Jun 16, 2025, ages 8-12, $250 per week, 9:00 am start, call (530) 555-0147</div>"#;
        let events = parse(html);
        assert_eq!(events.len(), 1);
        let ev = &events[0];
        assert!(ev.prices.contains(&"$250 per week".to_string()));
        assert!(ev.times.contains(&"9:00 am".to_string()));
        assert!(ev.ages.iter().any(|a| a.starts_with("ages 8")));
        assert!(ev.contacts.contains(&"(530) 555-0147".to_string()));
    }

    #[test]
    fn test_parser_is_deterministic() {
        let html = r#"
        <ul class="events">
            <li class="event">Member-Guest - Aug 12, 2025</li>
            <li class="event">Club Championship - 09/21/2025</li>
        </ul>
        <table><tr><td>Couples Scramble 08/09/2025</td></tr></table>
        "#;
        let first = parse(html);
        let second = parse(html);
        assert_eq!(first, second);
    }
}
