// src/sentiment/parse.rs
// Completion text -> validated ClassificationResult

use serde_json::Value;

use super::types::{ClassificationResult, Rating, Sentiment};
use crate::error::{ClassifyError, Result};

const FENCE: &str = "```";

/// Remove surrounding markdown code fences (```` ```json ... ``` ````) and whitespace.
/// Text without fences comes back trimmed.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();

    let body = match trimmed.strip_prefix(FENCE) {
        Some(rest) => {
            // Skip a language tag such as `json`
            let tag_len = rest
                .find(|c: char| !c.is_ascii_alphanumeric())
                .unwrap_or(rest.len());
            &rest[tag_len..]
        }
        None => trimmed,
    };

    let body = body.trim_end();
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

/// Parse completion text into a classification.
///
/// Not JSON after fence stripping -> `MalformedResponse`.
/// JSON of the wrong shape, enum or range -> `SchemaViolation`.
pub fn parse_classification(text: &str) -> Result<ClassificationResult> {
    let cleaned = strip_code_fences(text);
    let value: Value = serde_json::from_str(cleaned).map_err(|e| {
        tracing::debug!(error = %e, "Completion is not valid JSON");
        ClassifyError::MalformedResponse
    })?;
    validate_classification(&value)
}

/// Check a parsed JSON value against the result schema
pub fn validate_classification(value: &Value) -> Result<ClassificationResult> {
    let obj = value.as_object().ok_or_else(|| {
        ClassifyError::SchemaViolation(format!("expected a JSON object, got {}", kind(value)))
    })?;

    let sentiment = match obj.get("sentiment") {
        Some(Value::String(s)) => s.parse::<Sentiment>()?,
        Some(other) => {
            return Err(ClassifyError::SchemaViolation(format!(
                "sentiment must be a string, got {}",
                kind(other)
            )));
        }
        None => return Err(missing("sentiment")),
    };

    let rating = match obj.get("rating") {
        Some(Value::Number(n)) => {
            let n = n.as_i64().ok_or_else(|| {
                ClassifyError::SchemaViolation(format!("rating must be an integer, got {}", n))
            })?;
            Rating::try_from(n)?
        }
        Some(other) => {
            return Err(ClassifyError::SchemaViolation(format!(
                "rating must be an integer, got {}",
                kind(other)
            )));
        }
        None => return Err(missing("rating")),
    };

    Ok(ClassificationResult { sentiment, rating })
}

fn missing(field: &str) -> ClassifyError {
    ClassifyError::SchemaViolation(format!("missing field '{}'", field))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Fence stripping
    // ========================================================================

    #[test]
    fn test_strip_plain_text_is_trimmed() {
        assert_eq!(strip_code_fences("  {\"a\":1}\n"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_json_fence_multiline() {
        let text = "```json\n{\"sentiment\": \"positive\", \"rating\": 5}\n```";
        assert_eq!(
            strip_code_fences(text),
            "{\"sentiment\": \"positive\", \"rating\": 5}"
        );
    }

    #[test]
    fn test_strip_json_fence_single_line() {
        let text = "```json {\"sentiment\": \"neutral\", \"rating\": 3} ```";
        assert_eq!(
            strip_code_fences(text),
            "{\"sentiment\": \"neutral\", \"rating\": 3}"
        );
    }

    #[test]
    fn test_strip_bare_fence() {
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
    }

    #[test]
    fn test_strip_unclosed_fence() {
        assert_eq!(strip_code_fences("```json\n{}"), "{}");
    }

    // ========================================================================
    // Parsing and validation
    // ========================================================================

    #[test]
    fn test_parse_valid() {
        let result = parse_classification(r#"{"sentiment": "negative", "rating": 1}"#).unwrap();
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.rating.value(), 1);
    }

    #[test]
    fn test_parse_fenced() {
        let result =
            parse_classification("```json\n{\"sentiment\": \"positive\", \"rating\": 4}\n```")
                .unwrap();
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.rating.value(), 4);
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let result =
            parse_classification(r#"{"sentiment": "neutral", "rating": 3, "reason": "meh"}"#)
                .unwrap();
        assert_eq!(result.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_prose_is_malformed() {
        let err = parse_classification("I think this is positive.").unwrap_err();
        assert!(matches!(err, ClassifyError::MalformedResponse));
    }

    #[test]
    fn test_truncated_json_is_malformed() {
        let err = parse_classification(r#"{"sentiment": "positive", "rat"#).unwrap_err();
        assert!(matches!(err, ClassifyError::MalformedResponse));
    }

    #[test]
    fn test_blank_completion_is_malformed() {
        for text in ["", "   ", "\n", "```json\n```"] {
            let err = parse_classification(text).unwrap_err();
            assert!(matches!(err, ClassifyError::MalformedResponse), "{:?}", text);
        }
    }

    #[test]
    fn test_unknown_sentiment_is_schema_violation() {
        let err = parse_classification(r#"{"sentiment": "mixed", "rating": 3}"#).unwrap_err();
        assert!(matches!(err, ClassifyError::SchemaViolation(_)));
        assert!(err.to_string().contains("mixed"));
    }

    #[test]
    fn test_rating_out_of_range() {
        for text in [
            r#"{"sentiment": "positive", "rating": 6}"#,
            r#"{"sentiment": "negative", "rating": 0}"#,
        ] {
            let err = parse_classification(text).unwrap_err();
            assert!(matches!(err, ClassifyError::SchemaViolation(_)), "{}", text);
        }
    }

    #[test]
    fn test_rating_must_be_integer() {
        for text in [
            r#"{"sentiment": "neutral", "rating": 3.5}"#,
            r#"{"sentiment": "neutral", "rating": "3"}"#,
            r#"{"sentiment": "neutral", "rating": null}"#,
        ] {
            let err = parse_classification(text).unwrap_err();
            assert!(err.to_string().contains("integer"), "{}", text);
        }
    }

    #[test]
    fn test_missing_fields() {
        let err = parse_classification(r#"{"rating": 3}"#).unwrap_err();
        assert!(err.to_string().contains("sentiment"));
        let err = parse_classification(r#"{"sentiment": "neutral"}"#).unwrap_err();
        assert!(err.to_string().contains("rating"));
    }

    #[test]
    fn test_non_object_json_is_schema_violation() {
        let err = parse_classification(r#""positive""#).unwrap_err();
        assert!(matches!(err, ClassifyError::SchemaViolation(_)));
        let err = parse_classification("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("array"));
    }
}
