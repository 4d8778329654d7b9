use std::collections::BTreeMap;
use std::path::Path;

use crate::config::types::Course;
use crate::ConfigError;

/// Loads and normalizes the course configuration file.
///
/// The file is a JSON object mapping course name → course entry. During
/// normalization the map key becomes the course's `name` (unless the entry
/// already carries one), and courses with no URLs are skipped with a warning
/// rather than failing the load.
///
/// # Arguments
///
/// * `path` - Path to the JSON configuration file
///
/// # Returns
///
/// * `Ok(Vec<Course>)` - Normalized course list, ordered by name
/// * `Err(ConfigError)` - Failed to read or parse the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use fairway_scout::config::load_config;
///
/// let courses = load_config(Path::new("courses.json")).unwrap();
/// for course in &courses {
///     println!("{}: {} URLs", course.name, course.urls.len());
/// }
/// ```
pub fn load_config(path: &Path) -> Result<Vec<Course>, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse JSON into a name → entry mapping
    let entries: BTreeMap<String, Course> = serde_json::from_str(&content)?;

    // Normalize into a course list
    let mut courses = Vec::new();
    for (name, mut course) in entries {
        if course.name.is_empty() {
            course.name = name;
        }

        if course.urls.is_empty() {
            tracing::warn!("Course {} has no URLs; skipping", course.name);
            continue;
        }

        courses.push(course);
    }

    Ok(courses)
}
