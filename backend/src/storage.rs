use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{BreedPrediction, DnaTestOrder, DogAttributes};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    pub id: Uuid,
    pub pet_name: Option<String>,
    pub image_hash: String,
    pub created_at: DateTime<Utc>,
    pub breeds: Vec<BreedPrediction>,
    pub attributes: DogAttributes,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub id: Uuid,
    pub prediction_id: Option<Uuid>,
    pub pdf_url: String,
    pub created_at: DateTime<Utc>,
}

/// Process-lifetime storage for prediction, report, and DNA-test records.
/// Cloned handles share state; a relational backend is out of scope.
#[derive(Clone, Default)]
pub struct MemStorage {
    inner: Arc<Mutex<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    predictions: HashMap<Uuid, PredictionRecord>,
    reports: HashMap<Uuid, ReportRecord>,
    dna_tests: HashMap<Uuid, DnaTestOrder>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_prediction(
        &self,
        pet_name: Option<String>,
        image_hash: String,
        breeds: Vec<BreedPrediction>,
        attributes: DogAttributes,
    ) -> PredictionRecord {
        let record = PredictionRecord {
            id: Uuid::new_v4(),
            pet_name,
            image_hash,
            created_at: Utc::now(),
            breeds,
            attributes,
        };
        self.inner
            .lock()
            .unwrap()
            .predictions
            .insert(record.id, record.clone());
        record
    }

    pub fn get_prediction(&self, id: Uuid) -> Option<PredictionRecord> {
        self.inner.lock().unwrap().predictions.get(&id).cloned()
    }

    pub fn create_report(&self, prediction_id: Option<Uuid>, pdf_url: String) -> ReportRecord {
        let record = ReportRecord {
            id: Uuid::new_v4(),
            prediction_id,
            pdf_url,
            created_at: Utc::now(),
        };
        self.inner
            .lock()
            .unwrap()
            .reports
            .insert(record.id, record.clone());
        record
    }

    pub fn create_dna_test(&self, order: DnaTestOrder) -> DnaTestOrder {
        self.inner
            .lock()
            .unwrap()
            .dna_tests
            .insert(order.id, order.clone());
        order
    }

    pub fn all_dna_tests(&self) -> Vec<DnaTestOrder> {
        let mut orders: Vec<DnaTestOrder> = self
            .inner
            .lock()
            .unwrap()
            .dna_tests
            .values()
            .cloned()
            .collect();
        orders.sort_by(|a, b| a.ordered_at.cmp(&b.ordered_at));
        orders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{KitType, OrderStatus};

    fn order(ordered_at: &str) -> DnaTestOrder {
        DnaTestOrder {
            id: Uuid::new_v4(),
            prediction_id: None,
            kit_type: KitType::Standard,
            full_name: "Jamie Park".to_string(),
            email: "jamie@example.com".to_string(),
            phone_number: "555-0100".to_string(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            postal_code: "90210".to_string(),
            status: OrderStatus::Ordered,
            ordered_at: ordered_at.to_string(),
            results: None,
        }
    }

    #[test]
    fn predictions_round_trip_by_id() {
        let storage = MemStorage::new();
        let record = storage.create_prediction(
            Some("Rex".to_string()),
            "abc123".to_string(),
            vec![BreedPrediction {
                name: "Beagle".to_string(),
                probability: 100,
            }],
            DogAttributes::uniform(5.0),
        );

        let fetched = storage.get_prediction(record.id).unwrap();
        assert_eq!(fetched.pet_name.as_deref(), Some("Rex"));
        assert_eq!(fetched.breeds.len(), 1);
        assert!(storage.get_prediction(Uuid::new_v4()).is_none());
    }

    #[test]
    fn dna_tests_list_in_order_date_order() {
        let storage = MemStorage::new();
        storage.create_dna_test(order("2025-04-02T10:00:00Z"));
        storage.create_dna_test(order("2025-04-01T10:00:00Z"));

        let orders = storage.all_dna_tests();
        assert_eq!(orders.len(), 2);
        assert!(orders[0].ordered_at < orders[1].ordered_at);
    }
}
