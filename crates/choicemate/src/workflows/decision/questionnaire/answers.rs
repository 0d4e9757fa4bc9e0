use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::super::domain::{Dimension, RatingsOptional, Weights};
use super::super::intake::ValidationError;

/// Reads `last_answer.weights`; all four dimensions must be numbers.
pub(crate) fn extract_weights(last_answer: Option<&Value>) -> Result<Weights, ValidationError> {
    let raw = last_answer
        .and_then(|answer| answer.get("weights"))
        .filter(|value| !value.is_null())
        .ok_or_else(|| ValidationError::new("weights", "is required to leave round 1"))?;

    let ratings = dimension_values(raw, "weights")?;
    let mut weights = Weights::default();
    for (dimension, value) in ratings.iter() {
        let value = value.ok_or_else(|| {
            ValidationError::new(format!("weights.{}", dimension.key()), "is required")
        })?;
        weights.set(dimension, value);
    }
    Ok(weights)
}

/// Reads `last_answer.option_ratings`; each dimension is a number, null, or absent.
pub(crate) fn extract_option_ratings(
    last_answer: Option<&Value>,
) -> Result<BTreeMap<String, RatingsOptional>, ValidationError> {
    let raw = last_answer
        .and_then(|answer| answer.get("option_ratings"))
        .filter(|value| !value.is_null())
        .ok_or_else(|| ValidationError::new("option_ratings", "is required to leave round 2"))?;

    let options = raw
        .as_object()
        .ok_or_else(|| ValidationError::new("option_ratings", "must be an object"))?;

    options
        .iter()
        .map(|(option, ratings)| {
            let path = format!("option_ratings.{option}");
            dimension_values(ratings, &path).map(|ratings| (option.clone(), ratings))
        })
        .collect()
}

fn dimension_values(value: &Value, path: &str) -> Result<RatingsOptional, ValidationError> {
    let object = value
        .as_object()
        .ok_or_else(|| ValidationError::new(path, "must be an object"))?;
    reject_unknown_dimensions(object, path)?;

    let mut values = RatingsOptional::default();
    for dimension in Dimension::ALL {
        values.set(dimension, number_at(object, dimension, path)?);
    }
    Ok(values)
}

fn reject_unknown_dimensions(object: &Map<String, Value>, path: &str) -> Result<(), ValidationError> {
    match object.keys().find(|key| Dimension::from_key(key).is_none()) {
        Some(key) => Err(ValidationError::new(
            format!("{path}.{key}"),
            "is not a known dimension",
        )),
        None => Ok(()),
    }
}

fn number_at(
    object: &Map<String, Value>,
    dimension: Dimension,
    path: &str,
) -> Result<Option<f64>, ValidationError> {
    match object.get(dimension.key()) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => Ok(number.as_f64()),
        Some(_) => Err(ValidationError::new(
            format!("{path}.{}", dimension.key()),
            "must be a number or null",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn weights_accept_integers_and_floats() {
        let answer = json!({"weights": {"impact": 4, "cost": 2.5, "risk": 3, "reversibility": 1}});

        let weights = extract_weights(Some(&answer)).expect("weights parse");

        assert_eq!(weights.impact, 4.0);
        assert_eq!(weights.cost, 2.5);
    }

    #[test]
    fn weights_name_the_missing_field() {
        let answer = json!({"weights": {"impact": 4, "risk": 3, "reversibility": 1}});

        let err = extract_weights(Some(&answer)).unwrap_err();

        assert_eq!(err.field, "weights.cost");
    }

    #[test]
    fn weights_reject_unknown_fields_and_strings() {
        let unknown = json!({"weights": {"impact": 4, "cost": 2, "risk": 3, "reversibility": 1, "fun": 5}});
        assert_eq!(extract_weights(Some(&unknown)).unwrap_err().field, "weights.fun");

        let text = json!({"weights": {"impact": "4", "cost": 2, "risk": 3, "reversibility": 1}});
        assert_eq!(extract_weights(Some(&text)).unwrap_err().field, "weights.impact");
    }

    #[test]
    fn weights_are_required() {
        assert_eq!(extract_weights(None).unwrap_err().field, "weights");
        let answer = json!({"weights": [4, 2, 3, 1]});
        assert_eq!(extract_weights(Some(&answer)).unwrap_err().field, "weights");
    }

    #[test]
    fn option_ratings_treat_null_and_absent_as_unknown() {
        let answer = json!({"option_ratings": {"A": {"impact": 4, "cost": null}}});

        let ratings = extract_option_ratings(Some(&answer)).expect("ratings parse");

        let a = ratings.get("A").expect("option A present");
        assert_eq!(a.impact, Some(4.0));
        assert_eq!(a.cost, None);
        assert_eq!(a.risk, None);
    }

    #[test]
    fn option_ratings_reject_non_numeric_values() {
        let answer = json!({"option_ratings": {"A": {"impact": true}}});

        let err = extract_option_ratings(Some(&answer)).unwrap_err();

        assert_eq!(err.field, "option_ratings.A.impact");
    }

    #[test]
    fn option_ratings_require_object_entries() {
        let answer = json!({"option_ratings": {"A": 3}});
        assert_eq!(
            extract_option_ratings(Some(&answer)).unwrap_err().field,
            "option_ratings.A"
        );
        assert_eq!(
            extract_option_ratings(Some(&json!({}))).unwrap_err().field,
            "option_ratings"
        );
    }
}
