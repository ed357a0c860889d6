use std::env;
use std::path::PathBuf;

use log::warn;

const DEFAULT_CLASSIFIER_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/Pavarissy/ConvNextV2-large-DogBreed";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub huggingface_api_key: String,
    pub classifier_endpoint: String,
    pub reports_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(5000);
        let huggingface_api_key = env::var("HUGGINGFACE_API_KEY").unwrap_or_default();
        let classifier_endpoint = env::var("CLASSIFIER_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_CLASSIFIER_ENDPOINT.to_string());
        let reports_dir = env::var("REPORTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("reports"));

        Self {
            port,
            huggingface_api_key,
            classifier_endpoint,
            reports_dir,
        }
    }

    /// Warns about missing configuration instead of refusing to start;
    /// the classifier falls back to mock data without a key.
    pub fn validate(&self) {
        if self.huggingface_api_key.is_empty() {
            warn!("Missing environment variable: HUGGINGFACE_API_KEY");
            warn!("Breed prediction will use mock data.");
        }
    }
}
