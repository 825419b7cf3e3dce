//! JSON repair and per-field coercion of model output.
//!
//! The model is instructed to return a bare JSON object, but models drift:
//! they wrap the object in prose or code fences, invent enum spellings,
//! return confidence as a string. Extraction and coercion are therefore
//! deliberately forgiving, and each field is coerced independently — one
//! bad field never rejects the rest of the response.

use serde_json::{Map, Value};
use triage_core::enrichment::{MODEL_SUMMARY_MAX, REPLY_MAX, truncate_chars};
use triage_core::{Category, EnrichmentResult, Priority, Sentiment};

/// Confidence substituted when the model omits the value or sends
/// something unusable.
pub const MODEL_DEFAULT_CONFIDENCE: f64 = 0.6;

/// Pull a JSON object out of raw model text.
///
/// Strict parse first; if that fails, retry on the span from the first `{`
/// to the last `}` (models love to wrap the object in prose or fences).
/// Returns `None` when neither attempt yields a JSON object. The span
/// repair only runs when the strict parse fails outright: a response that
/// IS valid JSON but not an object (say, an array around the object) is
/// rejected as-is rather than mined for an inner object.
pub fn extract_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => return Some(map),
        Ok(_) => return None,
        Err(_) => {}
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Coerce a parsed model response into an enrichment record.
///
/// Enum fields fall back to their defaults individually; text fields are
/// stringified and truncated to the model-path bounds. Confidence is NOT
/// clamped to [0, 1] — an out-of-range value passes through untouched.
pub fn coerce_fields(data: &Map<String, Value>) -> EnrichmentResult {
    EnrichmentResult {
        category: coerce_enum(data.get("category"), Category::parse_loose),
        priority: coerce_enum(data.get("priority"), Priority::parse_loose),
        sentiment: coerce_enum(data.get("sentiment"), Sentiment::parse_loose),
        summary: coerce_text(data.get("summary"), MODEL_SUMMARY_MAX),
        suggested_reply: coerce_text(data.get("suggested_reply"), REPLY_MAX),
        confidence: coerce_confidence(data.get("confidence")),
    }
}

fn coerce_enum<T: Default>(value: Option<&Value>, parse: fn(&str) -> Option<T>) -> T {
    value
        .and_then(|v| v.as_str())
        .and_then(parse)
        .unwrap_or_default()
}

fn coerce_text(value: Option<&Value>, max: usize) -> String {
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        // Non-string scalars and structures keep their JSON text.
        Some(other) => other.to_string(),
    };
    truncate_chars(&text, max)
}

fn coerce_confidence(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    // Absent, non-numeric, and zero all mean "the model didn't say".
    match parsed {
        Some(c) if c != 0.0 => c,
        _ => MODEL_DEFAULT_CONFIDENCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_response() -> &'static str {
        r#"{
            "category": "LOGIN",
            "priority": "HIGH",
            "sentiment": "ANGRY",
            "summary": "User cannot sign in after password reset.",
            "suggested_reply": "Sorry about that — we are checking your account now.",
            "confidence": 0.92
        }"#
    }

    #[test]
    fn well_formed_response_roundtrips_verbatim() {
        let data = extract_object(full_response()).unwrap();
        let result = coerce_fields(&data);
        assert_eq!(result.category, Category::Login);
        assert_eq!(result.priority, Priority::High);
        assert_eq!(result.sentiment, Sentiment::Angry);
        assert_eq!(result.summary, "User cannot sign in after password reset.");
        assert_eq!(
            result.suggested_reply,
            "Sorry about that — we are checking your account now."
        );
        assert_eq!(result.confidence, 0.92);
    }

    #[test]
    fn extract_recovers_object_wrapped_in_prose() {
        let text = format!("Sure! Here is the JSON:\n```json\n{}\n```", full_response());
        let data = extract_object(&text).unwrap();
        assert_eq!(data.get("category").unwrap(), "LOGIN");
    }

    #[test]
    fn extract_spans_newlines_greedily() {
        let text = "noise {\n \"category\": \"TECH\"\n} trailing";
        let data = extract_object(text).unwrap();
        assert_eq!(data.get("category").unwrap(), "TECH");
    }

    #[test]
    fn extract_rejects_non_objects() {
        assert!(extract_object("no json here").is_none());
        assert!(extract_object("[1, 2, 3]").is_none());
        assert!(extract_object("} backwards {").is_none());
        assert!(extract_object("{ not json }").is_none());
        // Valid JSON that is not an object is rejected outright; the span
        // repair must not dig the inner object out of the array.
        assert!(extract_object(r#"[{"category": "TECH"}]"#).is_none());
    }

    #[test]
    fn one_invalid_field_defaults_alone() {
        let text = r#"{
            "category": "SPAM",
            "priority": "HIGH",
            "sentiment": "POSITIVE",
            "summary": "s",
            "suggested_reply": "r",
            "confidence": 0.8
        }"#;
        let result = coerce_fields(&extract_object(text).unwrap());
        assert_eq!(result.category, Category::Other);
        assert_eq!(result.priority, Priority::High);
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.summary, "s");
        assert_eq!(result.confidence, 0.8);
    }

    #[test]
    fn enum_values_are_trimmed_and_uppercased() {
        let text = r#"{"category": " billing ", "priority": "critical", "sentiment": "Positive"}"#;
        let result = coerce_fields(&extract_object(text).unwrap());
        assert_eq!(result.category, Category::Billing);
        assert_eq!(result.priority, Priority::Critical);
        assert_eq!(result.sentiment, Sentiment::Positive);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let result = coerce_fields(&extract_object("{}").unwrap());
        assert_eq!(result.category, Category::Other);
        assert_eq!(result.priority, Priority::Medium);
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.summary, "");
        assert_eq!(result.suggested_reply, "");
        assert_eq!(result.confidence, MODEL_DEFAULT_CONFIDENCE);
    }

    #[test]
    fn text_fields_truncate_to_model_bounds() {
        let long = "a".repeat(3000);
        let text = format!(r#"{{"summary": "{long}", "suggested_reply": "{long}"}}"#);
        let result = coerce_fields(&extract_object(&text).unwrap());
        assert_eq!(result.summary.chars().count(), MODEL_SUMMARY_MAX);
        assert_eq!(result.suggested_reply.chars().count(), REPLY_MAX);
    }

    #[test]
    fn confidence_falsy_values_default() {
        for text in [
            r#"{"confidence": null}"#,
            r#"{"confidence": 0}"#,
            r#"{"confidence": ""}"#,
            r#"{"confidence": "n/a"}"#,
            r#"{"confidence": false}"#,
        ] {
            let result = coerce_fields(&extract_object(text).unwrap());
            assert_eq!(result.confidence, MODEL_DEFAULT_CONFIDENCE, "for {text}");
        }
    }

    #[test]
    fn confidence_numeric_string_parses() {
        let result = coerce_fields(&extract_object(r#"{"confidence": "0.75"}"#).unwrap());
        assert_eq!(result.confidence, 0.75);
    }

    #[test]
    fn confidence_is_not_clamped() {
        let result = coerce_fields(&extract_object(r#"{"confidence": 1.7}"#).unwrap());
        assert_eq!(result.confidence, 1.7);
        let result = coerce_fields(&extract_object(r#"{"confidence": -0.2}"#).unwrap());
        assert_eq!(result.confidence, -0.2);
    }

    #[test]
    fn non_string_summary_keeps_its_json_text() {
        let result = coerce_fields(&extract_object(r#"{"summary": 42}"#).unwrap());
        assert_eq!(result.summary, "42");
    }
}
