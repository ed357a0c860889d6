//! Wire-format compatibility tests. The JSON shapes here are the ones the
//! original web client sends and expects; key casing is load-bearing.

use serde_json::{Value, json};
use shared::{
    BreedPrediction, DnaTestRequest, DogAttributes, GenerateReportRequest, KitType, OrderStatus,
    PredictionResults,
};
use uuid::Uuid;

#[test]
fn prediction_results_serializes_with_camel_case_keys() {
    let results = PredictionResults {
        prediction_id: Uuid::new_v4(),
        top_breeds: vec![BreedPrediction {
            name: "Labrador Retriever".into(),
            probability: 60,
        }],
        attributes: DogAttributes::uniform(5.0),
        selected_image: "aGVsbG8=".into(),
    };

    let value: Value = serde_json::to_value(&results).unwrap();
    assert!(value.get("predictionId").is_some());
    assert!(value.get("topBreeds").is_some());
    assert!(value.get("selectedImage").is_some());
    // Attribute keys stay snake_case, matching the original client types.
    assert!(value["attributes"].get("energy_level").is_some());
    assert_eq!(value["topBreeds"][0]["probability"], json!(60));
}

#[test]
fn kit_type_round_trips_as_lowercase() {
    let value = serde_json::to_value(KitType::Premium).unwrap();
    assert_eq!(value, json!("premium"));

    let parsed: KitType = serde_json::from_value(json!("standard")).unwrap();
    assert_eq!(parsed, KitType::Standard);
    assert_eq!(KitType::Standard.to_string(), "standard");
    assert_eq!(OrderStatus::Ordered.to_string(), "ordered");
}

#[test]
fn dna_request_accepts_the_original_client_payload() {
    let payload = json!({
        "kitType": "premium",
        "fullName": "Jamie Park",
        "email": "jamie@example.com",
        "phoneNumber": "555-0100",
        "postalCode": "90210",
        "orderedAt": "2025-04-02T10:00:00Z"
    });

    let request: DnaTestRequest = serde_json::from_value(payload).unwrap();
    assert_eq!(request.kit_type, Some(KitType::Premium));
    assert_eq!(request.full_name.as_deref(), Some("Jamie Park"));
    assert!(request.address.is_none());
    assert!(request.prediction_id.is_none());
}

#[test]
fn report_request_tolerates_missing_parts() {
    // Handlers do their own required-field validation so that the response
    // body matches the original API's error shape.
    let request: GenerateReportRequest = serde_json::from_value(json!({})).unwrap();
    assert!(request.selected_image.is_none());
    assert!(request.top_breeds.is_none());
    assert!(request.attributes.is_none());
}
