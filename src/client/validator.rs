use crate::error::ValidationError;

pub const MIN_IDEA_CHARS: usize = 10;
pub const MAX_IDEA_CHARS: usize = 1000;

/// Outcome of [`validate`] in the shape the presentation layer consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl From<Result<(), ValidationError>> for ValidationReport {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self {
                is_valid: true,
                error: None,
            },
            Err(err) => Self {
                is_valid: false,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Checks the idea text bounds before anything touches the network.
///
/// The lower bound applies to the trimmed text, the upper bound to the raw text. Lengths are
/// counted in characters, not bytes.
pub fn check_idea(idea: &str) -> Result<(), ValidationError> {
    let trimmed = idea.trim().chars().count();
    if trimmed < MIN_IDEA_CHARS {
        return Err(ValidationError::TooShort {
            min: MIN_IDEA_CHARS,
            actual: trimmed,
        });
    }

    let raw = idea.chars().count();
    if raw > MAX_IDEA_CHARS {
        return Err(ValidationError::TooLong {
            max: MAX_IDEA_CHARS,
            actual: raw,
        });
    }

    Ok(())
}

pub fn validate(idea: &str) -> ValidationReport {
    check_idea(idea).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_idea_mentions_minimum_length() {
        let report = validate("");
        assert!(!report.is_valid);
        let error = report.error.expect("error message");
        assert!(error.contains("too short"));
        assert!(error.contains("10"));
    }

    #[test]
    fn whitespace_padding_does_not_count_towards_minimum() {
        assert!(!validate("   short    ").is_valid);
        assert!(!validate(&format!("  {}  ", "x".repeat(9))).is_valid);
        assert!(validate(&format!("  {}  ", "x".repeat(10))).is_valid);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(validate(&"x".repeat(MIN_IDEA_CHARS)).is_valid);
        assert!(validate(&"x".repeat(MAX_IDEA_CHARS)).is_valid);
        assert!(!validate(&"x".repeat(MIN_IDEA_CHARS - 1)).is_valid);

        let report = validate(&"x".repeat(MAX_IDEA_CHARS + 1));
        assert!(!report.is_valid);
        assert_eq!(
            report.error.as_deref(),
            Some("Idea is too long: please use at most 1000 characters (currently 1001).")
        );
    }

    #[test]
    fn upper_bound_counts_raw_length_including_padding() {
        let padded = format!("{}{}", " ".repeat(5), "x".repeat(MAX_IDEA_CHARS - 2));
        assert_eq!(
            check_idea(&padded),
            Err(ValidationError::TooLong {
                max: MAX_IDEA_CHARS,
                actual: MAX_IDEA_CHARS + 3,
            })
        );
    }

    #[test]
    fn lengths_are_counted_in_chars() {
        // 10 multi-byte characters, 30 bytes.
        assert!(validate("ドッグウォーキング！").is_valid);
        assert!(validate(&"é".repeat(MAX_IDEA_CHARS)).is_valid);
    }

    #[test]
    fn every_length_in_range_is_accepted() {
        for len in MIN_IDEA_CHARS..=MAX_IDEA_CHARS {
            assert!(validate(&"a".repeat(len)).is_valid, "length {len}");
        }
    }

    #[test]
    fn sample_idea_passes() {
        assert!(validate("A mobile app for dog walking services").is_valid);
    }
}
