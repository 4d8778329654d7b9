//! Configuration module for Fairway-Scout
//!
//! This module handles loading, normalizing, and validating the course
//! configuration file: a JSON object mapping course name → course entry.
//!
//! # Example
//!
//! ```no_run
//! use fairway_scout::config::load_config;
//! use std::path::Path;
//!
//! let courses = load_config(Path::new("courses.json")).unwrap();
//! println!("Loaded {} courses", courses.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Course, ScrapeOptions};

// Re-export parser and validation functions
pub use parser::load_config;
pub use validation::{validate_courses, validate_options};
