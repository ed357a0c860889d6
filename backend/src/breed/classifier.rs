use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use log::warn;
use serde::Deserialize;
use serde_json::json;

/// One candidate from the upstream classifier. The score is an unbounded
/// positive confidence, not a probability; only the top-K candidates are
/// returned, so scores do not sum to 1.
#[derive(Debug, Clone, Deserialize)]
pub struct RawClassification {
    pub label: String,
    pub score: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Classifier request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Client for the hosted image-classification model.
#[derive(Clone)]
pub struct BreedClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    top_k: usize,
}

impl BreedClassifier {
    pub fn new(endpoint: String, api_key: String, top_k: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
            top_k,
        }
    }

    /// Sends the image to the hosted model and returns the top-K
    /// candidates. Without an API key the client falls back to canned
    /// scores so the rest of the pipeline stays exercisable in development.
    pub async fn classify(
        &self,
        image: &[u8],
        use_preprocessing: bool,
    ) -> Result<Vec<RawClassification>, ClassifierError> {
        if self.api_key.is_empty() {
            warn!("No Hugging Face API key found. Using mock data.");
            actix_web::rt::time::sleep(Duration::from_secs(2)).await;
            return Ok(self.mock_classifications());
        }

        let body = json!({
            "inputs": { "image": BASE64.encode(image) },
            "options": { "wait_for_model": true, "use_preprocessing": use_preprocessing },
        });

        let mut candidates: Vec<RawClassification> = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        candidates.truncate(self.top_k);
        Ok(candidates)
    }

    fn mock_classifications(&self) -> Vec<RawClassification> {
        let mut canned = vec![
            RawClassification {
                label: "Labrador Retriever".to_string(),
                score: 0.55,
            },
            RawClassification {
                label: "Golden Retriever".to_string(),
                score: 0.30,
            },
            RawClassification {
                label: "Chesapeake Bay Retriever".to_string(),
                score: 0.15,
            },
        ];
        canned.truncate(self.top_k);
        canned
    }
}
