use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

/// One candidate breed with its displayed probability on the 0-100 scale.
///
/// The probability is produced in two passes: linear normalization of the
/// classifier's raw scores, then exponential re-weighting of the breeds that
/// matched a reference profile. Values are rounded independently, so a
/// displayed list does not always sum to exactly 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedPrediction {
    pub name: String,
    pub probability: u8,
}

/// Blended physical/behavioral profile. Each value is on a 0-10 scale,
/// rounded to one decimal place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DogAttributes {
    pub size: f32,
    pub weight: f32,
    pub aggression: f32,
    pub trainability: f32,
    pub energy_level: f32,
    pub lifespan: f32,
}

impl DogAttributes {
    /// All six dimensions set to the same value. Used for the neutral
    /// fallback when no predicted breed matches the reference catalog.
    pub fn uniform(value: f32) -> Self {
        Self {
            size: value,
            weight: value,
            aggression: value,
            trainability: value,
            energy_level: value,
            lifespan: value,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResults {
    pub prediction_id: Uuid,
    pub top_breeds: Vec<BreedPrediction>,
    pub attributes: DogAttributes,
    /// Base64 of the analyzed image, echoed back for display and reports.
    pub selected_image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateReportRequest {
    pub pet_name: Option<String>,
    pub prediction_id: Option<Uuid>,
    pub selected_image: Option<String>,
    pub top_breeds: Option<Vec<BreedPrediction>>,
    pub attributes: Option<DogAttributes>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportResponse {
    pub pdf_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum KitType {
    Standard,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    Ordered,
    Shipped,
    Completed,
}

/// DNA test kit order form. Everything is optional on the wire; the
/// handler enforces the required fields and fills in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DnaTestRequest {
    pub prediction_id: Option<Uuid>,
    pub kit_type: Option<KitType>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub status: Option<OrderStatus>,
    pub ordered_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnaTestOrder {
    pub id: Uuid,
    pub prediction_id: Option<Uuid>,
    pub kit_type: KitType,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub status: OrderStatus,
    pub ordered_at: String,
    pub results: Option<String>,
}
