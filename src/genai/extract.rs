use serde_json::Value;
use thiserror::Error;

/// Why structured data could not be recovered from model output.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("model output is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model output is missing required field \"{0}\"")]
    MissingKey(&'static str),
}

/// Recover a JSON value from free-form model output.
///
/// Models asked for "strict JSON" still wrap the payload in markdown code
/// fences often enough that stripping them is mandatory. After parsing, each
/// key in `required_keys` must be present at the top level or the whole
/// output is rejected; partial data is never returned.
pub fn extract_json(raw: &str, required_keys: &[&'static str]) -> Result<Value, ExtractError> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    let value: Value = serde_json::from_str(cleaned.trim())?;

    for &key in required_keys {
        if value.get(key).is_none() {
            return Err(ExtractError::MissingKey(key));
        }
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fenced_output_extracts_same_value_as_unfenced() {
        let plain = r#"{"recipe": {"title": "Fried Rice"}}"#;
        let fenced = format!("```json\n{plain}\n```");

        let a = extract_json(plain, &["recipe"]).unwrap();
        let b = extract_json(&fenced, &["recipe"]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a["recipe"]["title"], "Fried Rice");
    }

    #[test]
    fn bare_fences_and_surrounding_whitespace_are_stripped() {
        let raw = "\n```\n  {\"dietPlan\": {}}  \n```\n";
        let value = extract_json(raw, &["dietPlan"]).unwrap();
        assert_eq!(value, json!({"dietPlan": {}}));
    }

    #[test]
    fn non_json_output_fails_with_parse_error() {
        let err = extract_json("I'm sorry, I can't help with that.", &[]).unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }

    #[test]
    fn missing_required_key_is_rejected() {
        let raw = r#"{"analysis": {"foodIdentification": {"name": "Salad"}}}"#;
        let err = extract_json(raw, &["analysis", "recommendations"]).unwrap_err();
        assert!(matches!(err, ExtractError::MissingKey("recommendations")));
    }

    #[test]
    fn non_object_output_fails_required_key_check() {
        let err = extract_json("[1, 2, 3]", &["recipe"]).unwrap_err();
        assert!(matches!(err, ExtractError::MissingKey("recipe")));
    }

    #[test]
    fn no_required_keys_accepts_any_valid_json() {
        assert_eq!(extract_json("```json\n42\n```", &[]).unwrap(), json!(42));
    }
}
