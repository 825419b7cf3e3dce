//! Triage configuration.
//!
//! Behaviour that used to hang off process-global settings (credential
//! presence, dispatch mode) lives in an explicit struct handed to the
//! coordinator and dispatcher at construction time, so both paths are
//! testable without touching the environment.

/// Environment variable holding the model service credential.
pub const ENV_API_CREDENTIAL: &str = "MODEL_API_CREDENTIAL";
/// Environment variable naming the model to call.
pub const ENV_MODEL_NAME: &str = "MODEL_NAME";
/// Environment variable overriding the model endpoint root.
pub const ENV_BASE_URL: &str = "MODEL_BASE_URL";
/// Environment variable selecting deferred (true) or inline (false) dispatch.
pub const ENV_ASYNC_ENRICHMENT: &str = "ASYNC_ENRICHMENT";

pub const DEFAULT_MODEL: &str = "gpt-5.2";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Process configuration consumed by the triage core.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// API credential for the model service. `None` disables the model path
    /// entirely; triage then runs on keyword rules alone.
    pub api_credential: Option<String>,
    /// Model name sent to the service.
    pub model: String,
    /// Endpoint root of an OpenAI-compatible chat-completions service.
    pub base_url: String,
    /// Deferred (worker queue) vs inline (same request) enrichment.
    pub async_enrichment: bool,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            api_credential: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            async_enrichment: true,
        }
    }
}

impl TriageConfig {
    /// Read configuration from the environment, falling back to defaults.
    ///
    /// An empty credential counts as absent. `ASYNC_ENRICHMENT` accepts
    /// `1/true/yes/on` (any case); anything else means inline.
    pub fn from_env() -> Self {
        let api_credential = std::env::var(ENV_API_CREDENTIAL)
            .ok()
            .filter(|v| !v.trim().is_empty());
        let model =
            std::env::var(ENV_MODEL_NAME).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let async_enrichment = std::env::var(ENV_ASYNC_ENRICHMENT)
            .map(|v| parse_bool(&v))
            .unwrap_or(true);
        Self {
            api_credential,
            model,
            base_url,
            async_enrichment,
        }
    }

    /// Whether the model path is eligible at all.
    pub fn model_enabled(&self) -> bool {
        self.api_credential.is_some()
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_credential_and_defers() {
        let config = TriageConfig::default();
        assert!(!config.model_enabled());
        assert!(config.async_enrichment);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert!(parse_bool("1"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool(" yes "));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("nope"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn credential_presence_enables_model_path() {
        let config = TriageConfig {
            api_credential: Some("sk-test".into()),
            ..TriageConfig::default()
        };
        assert!(config.model_enabled());
    }
}
