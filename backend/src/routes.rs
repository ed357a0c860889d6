use std::io::Write;

use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::{Error, HttpResponse, web};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::Utc;
use futures::{StreamExt, TryStreamExt};
use log::{error, info};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use shared::{
    DnaTestOrder, DnaTestRequest, GenerateReportRequest, GenerateReportResponse, KitType,
    OrderStatus, PredictionResults,
};

use crate::breed::analysis::analyze;
use crate::breed::classifier::BreedClassifier;
use crate::breed::config::ScoringConfig;
use crate::breed::normalize::AnalysisError;
use crate::breed::profiles::BreedCatalog;
use crate::cache::{PredictionCache, image_hash};
use crate::config::AppConfig;
use crate::report::{ReportInput, generate_pdf_report};
use crate::storage::MemStorage;

const MAX_UPLOAD_IMAGES: usize = 5;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, reports_dir: String) {
    cfg.service(web::resource("/api/predict-breed").route(web::post().to(predict_breed)))
        .service(web::resource("/api/predictions/{prediction_id}").route(web::get().to(get_prediction)))
        .service(web::resource("/api/generate-report").route(web::post().to(generate_report)))
        .service(
            web::resource("/api/dna-tests")
                .route(web::post().to(create_dna_test))
                .route(web::get().to(list_dna_tests)),
        )
        .service(Files::new("/reports", reports_dir));
}

async fn predict_breed(
    classifier: web::Data<BreedClassifier>,
    catalog: web::Data<BreedCatalog>,
    scoring: web::Data<ScoringConfig>,
    cache: web::Data<PredictionCache>,
    storage: web::Data<MemStorage>,
    mut payload: Multipart,
) -> Result<HttpResponse, Error> {
    let mut images: Vec<Vec<u8>> = Vec::new();
    let mut pet_name: Option<String> = None;
    let mut use_preprocessing = false;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let field_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .unwrap_or("")
            .to_string();

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            data.write_all(&chunk?)?;
        }

        match field_name.as_str() {
            "images" => {
                if !data.is_empty() && images.len() < MAX_UPLOAD_IMAGES {
                    images.push(data);
                }
            }
            "petName" => {
                pet_name = Some(String::from_utf8_lossy(&data).trim().to_string())
                    .filter(|name| !name.is_empty());
            }
            "usePreprocessing" => {
                use_preprocessing = String::from_utf8_lossy(&data).trim() == "true";
            }
            _ => {}
        }
    }

    if images.is_empty() {
        return Ok(
            HttpResponse::BadRequest().json(ErrorResponse::new("No image files provided"))
        );
    }

    // Best-image selection is future work; the first upload is analyzed.
    let selected = &images[0];
    if image::guess_format(selected).is_err() {
        return Ok(
            HttpResponse::BadRequest().json(ErrorResponse::new("Only image files are allowed"))
        );
    }

    let hash = image_hash(selected);
    if let Some(cached) = cache.get(&hash, use_preprocessing) {
        info!("Returning cached prediction for image {}", &hash[..12]);
        return Ok(HttpResponse::Ok().json(cached));
    }

    let raw = match classifier.classify(selected, use_preprocessing).await {
        Ok(raw) => raw,
        Err(e) => {
            error!("Error predicting dog breed: {:?}", e);
            return Ok(HttpResponse::BadGateway().json(ErrorResponse::new(
                "The breed recognition service is currently unavailable. Please try again later.",
            )));
        }
    };

    let analysis = match analyze(&raw, &catalog, &scoring) {
        Ok(analysis) => analysis,
        Err(e) => {
            let AnalysisError::LowConfidence { max_score } = &e;
            info!("Rejected upload: best raw score {:.3} is below the confidence threshold", max_score);
            return Ok(HttpResponse::BadRequest().json(ErrorResponse::new(&e.to_string())));
        }
    };

    let record = storage.create_prediction(
        pet_name,
        hash.clone(),
        analysis.predictions.clone(),
        analysis.attributes.clone(),
    );
    let results = PredictionResults {
        prediction_id: record.id,
        top_breeds: analysis.predictions,
        attributes: analysis.attributes,
        selected_image: BASE64.encode(selected),
    };
    cache.insert(hash, use_preprocessing, results.clone());

    Ok(HttpResponse::Ok().json(results))
}

async fn get_prediction(storage: web::Data<MemStorage>, path: web::Path<String>) -> HttpResponse {
    let id_str = path.into_inner();
    let id = match Uuid::parse_str(&id_str) {
        Ok(uuid) => uuid,
        Err(_) => {
            return HttpResponse::BadRequest().json(ErrorResponse::new("Invalid UUID format"));
        }
    };
    match storage.get_prediction(id) {
        Some(record) => HttpResponse::Ok().json(record),
        None => HttpResponse::NotFound().json(ErrorResponse::new("Prediction not found")),
    }
}

async fn generate_report(
    config: web::Data<AppConfig>,
    storage: web::Data<MemStorage>,
    body: web::Json<GenerateReportRequest>,
) -> HttpResponse {
    let request = body.into_inner();
    let (Some(selected_image), Some(top_breeds), Some(attributes)) = (
        request.selected_image,
        request.top_breeds,
        request.attributes,
    ) else {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Missing required parameters"));
    };
    if selected_image.is_empty() || top_breeds.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Missing required parameters"));
    }

    let input = ReportInput {
        pet_name: request.pet_name.as_deref(),
        selected_image: &selected_image,
        top_breeds: &top_breeds,
        attributes: &attributes,
    };
    match generate_pdf_report(&input, &config.reports_dir) {
        Ok(file_name) => {
            let pdf_url = format!("/reports/{}", file_name);
            storage.create_report(request.prediction_id, pdf_url.clone());
            HttpResponse::Ok().json(GenerateReportResponse { pdf_url })
        }
        Err(e) => {
            error!("Error generating report: {:?}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to generate report"))
        }
    }
}

async fn create_dna_test(
    storage: web::Data<MemStorage>,
    body: web::Json<DnaTestRequest>,
) -> HttpResponse {
    let request = body.into_inner();

    let required = [
        &request.full_name,
        &request.email,
        &request.phone_number,
        &request.postal_code,
    ];
    if required
        .iter()
        .any(|field| field.as_deref().map_or(true, |value| value.trim().is_empty()))
    {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Missing required parameters"));
    }

    let order = DnaTestOrder {
        id: Uuid::new_v4(),
        prediction_id: request.prediction_id,
        kit_type: request.kit_type.unwrap_or(KitType::Standard),
        full_name: request.full_name.unwrap_or_default(),
        email: request.email.unwrap_or_default(),
        phone_number: request.phone_number.unwrap_or_default(),
        address: request.address.unwrap_or_default(),
        city: request.city.unwrap_or_default(),
        state: request.state.unwrap_or_default(),
        postal_code: request.postal_code.unwrap_or_default(),
        status: request.status.unwrap_or(OrderStatus::Ordered),
        ordered_at: request.ordered_at.unwrap_or_else(|| Utc::now().to_rfc3339()),
        results: None,
    };

    let order = storage.create_dna_test(order);
    info!("DNA test order {} ({} kit)", order.id, order.kit_type);

    HttpResponse::Ok().json(json!({
        "id": order.id,
        "message": "DNA test kit order submitted successfully"
    }))
}

async fn list_dna_tests(storage: web::Data<MemStorage>) -> HttpResponse {
    HttpResponse::Ok().json(storage.all_dna_tests())
}
