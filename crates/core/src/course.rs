//! Course catalogue constants and validation functions.
//!
//! Categories, levels and lesson content types are stored as plain text
//! columns; these lists are the single source of truth for the accepted
//! values and must match the `CHECK` constraints in the courses migration.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MIN_TITLE_LENGTH: usize = 3;
pub const MAX_TITLE_LENGTH: usize = 100;

pub const MIN_DESCRIPTION_LENGTH: usize = 10;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Category assigned when the author does not pick one.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Level assigned when the author does not pick one.
pub const DEFAULT_LEVEL: &str = "Beginner";

/// Lesson type assigned when the author does not pick one.
pub const DEFAULT_CONTENT_TYPE: &str = "text";

pub const VALID_CATEGORIES: &[&str] = &[
    "Programming",
    "Design",
    "Business",
    "Marketing",
    "Science",
    "Language",
    DEFAULT_CATEGORY,
];

pub const VALID_LEVELS: &[&str] = &[DEFAULT_LEVEL, "Intermediate", "Advanced"];

pub const VALID_CONTENT_TYPES: &[&str] = &["video", DEFAULT_CONTENT_TYPE, "quiz", "assignment"];

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

fn validate_choice(kind: &str, value: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {kind} '{value}'. Must be one of: {}",
            allowed.join(", ")
        )))
    }
}

pub fn validate_category(category: &str) -> Result<(), CoreError> {
    validate_choice("category", category, VALID_CATEGORIES)
}

pub fn validate_level(level: &str) -> Result<(), CoreError> {
    validate_choice("level", level, VALID_LEVELS)
}

pub fn validate_content_type(content_type: &str) -> Result<(), CoreError> {
    validate_choice("content type", content_type, VALID_CONTENT_TYPES)
}

/// Validate a course title (trimmed length in characters).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let len = title.trim().chars().count();
    if len < MIN_TITLE_LENGTH || len > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must be between {MIN_TITLE_LENGTH} and {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a course description (trimmed length in characters).
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    let len = description.trim().chars().count();
    if len < MIN_DESCRIPTION_LENGTH || len > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description must be between {MIN_DESCRIPTION_LENGTH} and \
             {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Prices are non-negative and finite.
pub fn validate_price(price: f64) -> Result<(), CoreError> {
    if !price.is_finite() || price < 0.0 {
        return Err(CoreError::Validation(
            "Price must be a positive number".to_string(),
        ));
    }
    Ok(())
}

/// Durations (course hours, lesson minutes) are non-negative.
pub fn validate_duration(duration: i32) -> Result<(), CoreError> {
    if duration < 0 {
        return Err(CoreError::Validation(
            "Duration must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
