//! Single entry point for ticket analysis.

use tracing::debug;
use triage_core::{EnrichmentResult, TriageConfig, classifier};

use crate::model::{ModelClassifier, ModelError};

/// Routes analysis to the model classifier when a credential is configured,
/// otherwise to the keyword classifier.
///
/// This is the only surface the rest of the system calls. Without a
/// credential `analyze` is infallible; with one, transport-level model
/// failures propagate for the dispatcher to convert into a skip.
pub struct Coordinator {
    model: Option<ModelClassifier>,
}

impl Coordinator {
    pub fn new(config: &TriageConfig) -> Self {
        let model = config.api_credential.as_ref().map(|credential| {
            ModelClassifier::new(
                credential.clone(),
                config.model.clone(),
                config.base_url.clone(),
            )
        });
        if model.is_none() {
            debug!("no model credential configured, triage runs on keyword rules");
        }
        Self { model }
    }

    /// Analyze one ticket's text into an enrichment record.
    pub async fn analyze(
        &self,
        title: &str,
        description: &str,
    ) -> Result<EnrichmentResult, ModelError> {
        match &self.model {
            Some(model) => model.classify(title, description).await,
            None => Ok(classifier::classify(title, description)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn without_credential_analyze_equals_keyword_classify() {
        let coordinator = Coordinator::new(&TriageConfig::default());
        for (title, desc) in [
            ("App crashes on checkout", "500 error when I click pay"),
            ("URGENT: charged twice for my subscription", "please refund asap"),
            ("hello", "nothing to see"),
        ] {
            let got = coordinator.analyze(title, desc).await.unwrap();
            assert_eq!(got, classifier::classify(title, desc));
        }
    }

    #[test]
    fn credential_enables_the_model_path() {
        let config = TriageConfig {
            api_credential: Some("sk-test".into()),
            ..TriageConfig::default()
        };
        assert!(Coordinator::new(&config).model.is_some());
        assert!(Coordinator::new(&TriageConfig::default()).model.is_none());
    }
}
