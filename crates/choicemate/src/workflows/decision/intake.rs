use std::collections::BTreeMap;

use super::domain::Ratings;

/// Malformed or missing caller input. `field` is a dotted path to the offending value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Problem statement and working option list after trimming and blank filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionIntake {
    pub problem: String,
    pub options: Vec<String>,
}

impl DecisionIntake {
    pub fn new(problem: &str, options: &[String]) -> Result<Self, ValidationError> {
        let problem = problem.trim();
        if problem.is_empty() {
            return Err(ValidationError::new("problem", "must not be blank"));
        }

        let options = clean_options(options);
        if options.len() < 2 {
            return Err(ValidationError::new(
                "options",
                "at least two non-blank options are required",
            ));
        }

        Ok(Self {
            problem: problem.to_string(),
            options,
        })
    }

    /// Ensures every working option has a complete ratings entry.
    pub fn require_ratings_for(
        &self,
        option_ratings: &BTreeMap<String, Ratings>,
    ) -> Result<(), ValidationError> {
        let missing: Vec<&str> = self
            .options
            .iter()
            .filter(|option| !option_ratings.contains_key(option.as_str()))
            .map(String::as_str)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(
                "facts.option_ratings",
                format!("missing ratings for {}", missing.join(", ")),
            ))
        }
    }
}

/// Trims every option, drops blanks, and keeps the first occurrence of repeated names.
pub fn clean_options(options: &[String]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(options.len());
    for option in options {
        let value = option.trim();
        if !value.is_empty() && !cleaned.iter().any(|existing| existing == value) {
            cleaned.push(value.to_string());
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn trims_problem_and_filters_blank_options() {
        let intake = DecisionIntake::new("  where to work ", &options(&[" A ", "", "   ", "B"]))
            .expect("intake accepted");

        assert_eq!(intake.problem, "where to work");
        assert_eq!(intake.options, options(&["A", "B"]));
    }

    #[test]
    fn repeated_options_collapse_to_first_occurrence() {
        let intake =
            DecisionIntake::new("choose", &options(&["B", "A", " B"])).expect("intake accepted");
        assert_eq!(intake.options, options(&["B", "A"]));

        let err = DecisionIntake::new("choose", &options(&["A", "A "])).unwrap_err();
        assert_eq!(err.field, "options");
    }

    #[test]
    fn rejects_blank_problem() {
        let err = DecisionIntake::new("   ", &options(&["A", "B"])).unwrap_err();
        assert_eq!(err.field, "problem");
    }

    #[test]
    fn rejects_single_usable_option() {
        let err = DecisionIntake::new("choose", &options(&["A", "  "])).unwrap_err();
        assert_eq!(err.field, "options");
    }

    #[test]
    fn reports_every_option_without_ratings() {
        let intake = DecisionIntake::new("choose", &options(&["A", "B", "C"])).expect("intake");
        let mut ratings = BTreeMap::new();
        ratings.insert("B".to_string(), Ratings::from_fn(|_| 3.0));

        let err = intake.require_ratings_for(&ratings).unwrap_err();
        assert_eq!(err.field, "facts.option_ratings");
        assert_eq!(err.message, "missing ratings for A, C");
    }
}
