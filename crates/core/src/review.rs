//! Course review rules and the average-rating computation.
//!
//! A review may only be written by a student enrolled in the course, at
//! most once per (course, student) pair. The course's cached `rating` is
//! the arithmetic mean of its review ratings, or 0 when it has none.

use crate::enrollment::MembershipChange;
use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

/// Maximum length of a review comment, in characters.
pub const MAX_COMMENT_LENGTH: usize = 200;

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate the rating and the optional comment of a new review.
pub fn validate_review(rating: i16, comment: Option<&str>) -> Result<(), CoreError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }

    if let Some(comment) = comment {
        if comment.trim().chars().count() > MAX_COMMENT_LENGTH {
            return Err(CoreError::Validation(format!(
                "Comment cannot exceed {MAX_COMMENT_LENGTH} characters"
            )));
        }
    }

    Ok(())
}

/// Reviews require an enrollment in the course at the time of writing.
pub fn ensure_can_review(is_enrolled: bool) -> Result<(), CoreError> {
    if is_enrolled {
        Ok(())
    } else {
        Err(CoreError::NotEnrolled(
            "Must be enrolled to review this course".to_string(),
        ))
    }
}

/// The review insert skips on the `(course_id, user_id)` unique key; an
/// unchanged set means the student has already reviewed.
pub fn ensure_first_review(change: MembershipChange) -> Result<(), CoreError> {
    match change {
        MembershipChange::Applied => Ok(()),
        MembershipChange::Unchanged => {
            Err(CoreError::Conflict("Course already reviewed".to_string()))
        }
    }
}

/* --------------------------------------------------------------------------
Aggregation
-------------------------------------------------------------------------- */

/// Arithmetic mean of the given ratings (`sum / count`), 0 when empty.
pub fn average_rating(ratings: &[i16]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: f64 = ratings.iter().map(|&r| f64::from(r)).sum();
    sum / ratings.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(validate_review(1, None).is_ok());
        assert!(validate_review(5, None).is_ok());
        assert_matches!(validate_review(0, None), Err(CoreError::Validation(_)));
        assert_matches!(validate_review(6, None), Err(CoreError::Validation(_)));
    }

    #[test]
    fn comment_length_limit() {
        let at_limit = "c".repeat(MAX_COMMENT_LENGTH);
        let over_limit = "c".repeat(MAX_COMMENT_LENGTH + 1);
        assert!(validate_review(4, Some(&at_limit)).is_ok());
        assert_matches!(
            validate_review(4, Some(&over_limit)),
            Err(CoreError::Validation(msg)) if msg.contains("200")
        );
    }

    #[test]
    fn comment_length_counts_characters_not_bytes() {
        // 200 two-byte characters are still within the limit.
        let accented = "é".repeat(MAX_COMMENT_LENGTH);
        assert!(validate_review(3, Some(&accented)).is_ok());
    }

    #[test]
    fn review_requires_enrollment() {
        assert!(ensure_can_review(true).is_ok());
        assert_matches!(ensure_can_review(false), Err(CoreError::NotEnrolled(_)));
    }

    #[test]
    fn second_review_is_a_conflict() {
        assert!(ensure_first_review(MembershipChange::Applied).is_ok());
        assert_matches!(
            ensure_first_review(MembershipChange::Unchanged),
            Err(CoreError::Conflict(msg)) if msg == "Course already reviewed"
        );
    }

    #[test]
    fn average_of_no_reviews_is_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn average_of_five_and_three_is_four() {
        assert!((average_rating(&[5, 3]) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn average_is_not_rounded() {
        assert!((average_rating(&[5, 4, 4]) - 13.0 / 3.0).abs() < 1e-9);
    }
}
