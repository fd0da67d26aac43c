//! Tri-state verdicts and the threshold classifiers that produce them.

use serde::{Deserialize, Serialize};

use crate::Options;

/// Outcome of a classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The metric is within the recommended range.
    #[default]
    Success,
    /// The metric works but could be improved.
    Warning,
    /// The metric fails the rule.
    Error,
}

/// A classifier's status plus a human-readable explanation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Classification outcome.
    pub status: Status,
    /// Explanation suitable for display.
    pub message: String,
}

impl Verdict {
    fn new(status: Status, message: String) -> Self {
        Self { status, message }
    }

    /// Whether the verdict is a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

/// Classify a page title length (characters).
///
/// Shorter than `title_min_len` is an error, longer than `title_max_len`
/// a warning, anything in between a success.
#[must_use]
pub fn evaluate_title_length(length: usize, options: &Options) -> Verdict {
    classify_length(
        "Title",
        length,
        options.title_min_len,
        options.title_max_len,
    )
}

/// Classify a meta description length (characters).
#[must_use]
pub fn evaluate_description_length(length: usize, options: &Options) -> Verdict {
    classify_length(
        "Description",
        length,
        options.description_min_len,
        options.description_max_len,
    )
}

fn classify_length(subject: &str, length: usize, min: usize, max: usize) -> Verdict {
    if length < min {
        Verdict::new(
            Status::Error,
            format!("{subject} too short (less than {min} characters)"),
        )
    } else if length > max {
        Verdict::new(
            Status::Warning,
            format!("{subject} too long (more than {max} characters)"),
        )
    } else {
        Verdict::new(
            Status::Success,
            format!("{subject} length is optimal (between {min} and {max} characters)"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_boundaries() {
        let opts = Options::default();
        assert_eq!(evaluate_title_length(0, &opts).status, Status::Error);
        assert_eq!(evaluate_title_length(9, &opts).status, Status::Error);
        assert_eq!(evaluate_title_length(10, &opts).status, Status::Success);
        assert!(evaluate_title_length(60, &opts).is_success());
        assert!(!evaluate_title_length(61, &opts).is_success());
        assert_eq!(evaluate_title_length(61, &opts).status, Status::Warning);
    }

    #[test]
    fn test_description_boundaries() {
        let opts = Options::default();
        assert_eq!(evaluate_description_length(49, &opts).status, Status::Error);
        assert_eq!(evaluate_description_length(50, &opts).status, Status::Success);
        assert_eq!(evaluate_description_length(160, &opts).status, Status::Success);
        assert_eq!(evaluate_description_length(161, &opts).status, Status::Warning);
    }

    #[test]
    fn test_messages_name_the_bounds() {
        let opts = Options::default();
        assert_eq!(
            evaluate_title_length(5, &opts).message,
            "Title too short (less than 10 characters)"
        );
        assert_eq!(
            evaluate_description_length(200, &opts).message,
            "Description too long (more than 160 characters)"
        );
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&Status::Warning).unwrap_or_default();
        assert_eq!(json, "\"warning\"");
    }
}
