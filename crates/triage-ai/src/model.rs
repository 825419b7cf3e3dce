//! Client for the external model service.

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};
use triage_core::{EnrichmentResult, classifier};

use crate::coerce::{coerce_fields, extract_object};

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("model request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model service returned {status}: {body}")]
    Service { status: u16, body: String },
}

const SYSTEM_INSTRUCTION: &str = "You are an AI support triage assistant. Return ONLY a JSON \
     object with keys: category, priority, sentiment, summary, suggested_reply, confidence. \
     category must be one of: BILLING, LOGIN, TECH, FEATURE, OTHER. \
     priority must be one of: LOW, MEDIUM, HIGH, CRITICAL. \
     sentiment must be one of: ANGRY, NEUTRAL, POSITIVE. \
     confidence must be between 0 and 1.";

fn user_message(title: &str, description: &str) -> String {
    format!("Ticket title: {title}\n\nTicket description: {description}\n\nReturn ONLY JSON.")
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

/// Classifier backed by an OpenAI-compatible chat-completions endpoint.
///
/// Makes exactly one call per ticket, no retries, transport default
/// timeouts. Transport and service failures surface as [`ModelError`] for
/// the dispatch layer to handle; a response that arrives but cannot be
/// shaped into the schema degrades silently to the keyword classifier.
pub struct ModelClassifier {
    client: reqwest::Client,
    credential: String,
    model: String,
    base_url: String,
}

impl ModelClassifier {
    /// `base_url` is the endpoint root, like `https://api.openai.com`
    /// (no trailing slash).
    pub fn new(credential: String, model: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            credential,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Classify one ticket via the model service.
    ///
    /// Never errors on malformed model output — that path returns the
    /// keyword classifier's result instead.
    pub async fn classify(
        &self,
        title: &str,
        description: &str,
    ) -> Result<EnrichmentResult, ModelError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_INSTRUCTION},
                {"role": "user", "content": user_message(title, description)},
            ],
        });

        debug!(url = %url, model = %self.model, "requesting model classification");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.credential)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ModelError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletion = resp.json().await?;
        let raw = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        Ok(shape_response(&raw, title, description))
    }
}

/// Turn raw model text into an enrichment record, degrading to the keyword
/// classifier when no JSON object can be recovered.
fn shape_response(raw: &str, title: &str, description: &str) -> EnrichmentResult {
    match extract_object(raw) {
        Some(data) => coerce_fields(&data),
        None => {
            info!("model response had no usable JSON object, degrading to keyword rules");
            classifier::classify(title, description)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_embeds_text_verbatim() {
        let msg = user_message("Crash on save", "It shows a 500 error");
        assert!(msg.contains("Ticket title: Crash on save"));
        assert!(msg.contains("Ticket description: It shows a 500 error"));
        assert!(msg.ends_with("Return ONLY JSON."));
    }

    #[test]
    fn system_instruction_enumerates_allowed_values() {
        for value in ["BILLING", "LOGIN", "TECH", "FEATURE", "OTHER", "LOW",
                      "MEDIUM", "HIGH", "CRITICAL", "ANGRY", "NEUTRAL", "POSITIVE"] {
            assert!(SYSTEM_INSTRUCTION.contains(value), "missing {value}");
        }
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let model = ModelClassifier::new(
            "sk-test".into(),
            "gpt-5.2".into(),
            "https://api.openai.com/".into(),
        );
        assert_eq!(model.base_url, "https://api.openai.com");
    }

    #[test]
    fn unparseable_response_degrades_to_keyword_result() {
        let title = "App crashes on checkout";
        let description = "500 error when I click pay";
        let shaped = shape_response("I could not produce JSON, sorry.", title, description);
        assert_eq!(shaped, classifier::classify(title, description));

        // An empty completion degrades the same way.
        let shaped = shape_response("", title, description);
        assert_eq!(shaped, classifier::classify(title, description));
    }

    #[test]
    fn parseable_response_does_not_touch_keyword_rules() {
        let shaped = shape_response(
            r#"{"category": "FEATURE", "confidence": 0.4}"#,
            "URGENT fraud",
            "charged twice",
        );
        // Keyword rules would say BILLING/CRITICAL; the model's answer wins.
        assert_eq!(shaped.category, triage_core::Category::Feature);
        assert_eq!(shaped.confidence, 0.4);
    }

    #[test]
    fn completion_envelope_parses_with_missing_content() {
        let completion: ChatCompletion =
            serde_json::from_str(r#"{"choices": [{"message": {"role": "assistant"}}]}"#).unwrap();
        assert_eq!(completion.choices[0].message.content, "");
    }
}
