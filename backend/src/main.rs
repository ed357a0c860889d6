mod breed;
mod cache;
mod config;
mod report;
mod routes;
mod storage;

use std::fs;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};

use breed::classifier::BreedClassifier;
use breed::config::ScoringConfig;
use breed::profiles::BreedCatalog;
use cache::PredictionCache;
use config::AppConfig;
use routes::configure_routes;
use storage::MemStorage;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    let app_config = AppConfig::from_env();
    app_config.validate();

    let scoring = match ScoringConfig::load() {
        Ok(scoring) => scoring,
        Err(e) => {
            log::warn!("Failed to load scoring config, using defaults: {}", e);
            ScoringConfig::default()
        }
    };
    log::info!(
        "Scoring config: top_k={}, threshold={}, alpha={}",
        scoring.top_k,
        scoring.confidence_threshold,
        scoring.decay_alpha
    );

    let catalog = match BreedCatalog::load() {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Failed to load breed attribute catalog: {:?}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Catalog loading failed: {:?}", e),
            ));
        }
    };
    log::info!("Loaded {} breed attribute profiles", catalog.len());

    fs::create_dir_all(&app_config.reports_dir)?;

    let classifier = BreedClassifier::new(
        app_config.classifier_endpoint.clone(),
        app_config.huggingface_api_key.clone(),
        scoring.top_k,
    );
    let cache = PredictionCache::new();
    let storage = MemStorage::new();

    let reports_dir = app_config.reports_dir.to_string_lossy().to_string();
    let bind_address = format!("0.0.0.0:{}", app_config.port);
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::AUTHORIZATION,
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(web::Data::new(app_config.clone()))
            .app_data(web::Data::new(scoring.clone()))
            .app_data(web::Data::new(catalog.clone()))
            .app_data(web::Data::new(classifier.clone()))
            .app_data(web::Data::new(cache.clone()))
            .app_data(web::Data::new(storage.clone()))
            .configure(|cfg| configure_routes(cfg, reports_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
