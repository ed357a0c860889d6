use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use sha2::{Digest, Sha256};
use shared::PredictionResults;

/// Hex sha256 of the uploaded bytes. Doubles as the cache key and the
/// stored prediction's stable reference to its source image.
pub fn image_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[derive(Debug, Hash, PartialEq, Eq, Clone)]
struct CacheKey {
    image_hash: String,
    use_preprocessing: bool,
}

/// Re-uploads of the same bytes skip the classifier round-trip. The
/// preprocessing flag is part of the key since it changes the upstream
/// model's answer.
#[derive(Clone, Default)]
pub struct PredictionCache {
    inner: Arc<Mutex<HashMap<CacheKey, PredictionResults>>>,
}

impl PredictionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, image_hash: &str, use_preprocessing: bool) -> Option<PredictionResults> {
        let key = CacheKey {
            image_hash: image_hash.to_string(),
            use_preprocessing,
        };
        self.inner.lock().unwrap().get(&key).cloned()
    }

    pub fn insert(
        &self,
        image_hash: String,
        use_preprocessing: bool,
        results: PredictionResults,
    ) {
        let key = CacheKey {
            image_hash,
            use_preprocessing,
        };
        self.inner.lock().unwrap().insert(key, results);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{BreedPrediction, DogAttributes};
    use uuid::Uuid;

    fn results() -> PredictionResults {
        PredictionResults {
            prediction_id: Uuid::new_v4(),
            top_breeds: vec![BreedPrediction {
                name: "Beagle".to_string(),
                probability: 100,
            }],
            attributes: DogAttributes::uniform(5.0),
            selected_image: String::new(),
        }
    }

    #[test]
    fn image_hash_is_stable_hex() {
        let first = image_hash(b"dog photo bytes");
        let second = image_hash(b"dog photo bytes");
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert_ne!(first, image_hash(b"other bytes"));
    }

    #[test]
    fn cached_results_round_trip() {
        let cache = PredictionCache::new();
        let hash = image_hash(b"dog photo bytes");
        let stored = results();

        cache.insert(hash.clone(), false, stored.clone());

        let hit = cache.get(&hash, false).unwrap();
        assert_eq!(hit.prediction_id, stored.prediction_id);
        assert!(cache.get(&hash, true).is_none());
    }
}
