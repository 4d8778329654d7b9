//! Parser registry and extraction strategies
//!
//! A parser is a pure function mapping a course's raw page text to event
//! records for one extraction strategy; it performs no I/O and is
//! deterministic for identical inputs. Exactly one parser is selected per
//! course via its `parser` config field.
//!
//! The registry is a closed mapping from parser name to function, fixed at
//! compile time. Site-specific strategies are added as new match arms.

mod generic;
mod rules;

pub use generic::parse_generic_events;
pub use rules::ExtractionRules;

use crate::config::Course;
use crate::records::EventRecord;

/// A pure extraction function: `(course, html_text, source_url) → events`
pub type ParserFn = fn(&Course, &str, &str) -> Vec<EventRecord>;

/// Looks up a parser by name.
///
/// Returns `None` for unknown names; the orchestrator treats that as a
/// caller error (logged, course skipped) rather than a crash.
pub fn lookup(name: &str) -> Option<ParserFn> {
    match name {
        "generic_events" => Some(parse_generic_events),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_generic_events() {
        assert!(lookup("generic_events").is_some());
    }

    #[test]
    fn test_lookup_unknown_name() {
        assert!(lookup("no_such_parser").is_none());
        assert!(lookup("").is_none());
    }
}
