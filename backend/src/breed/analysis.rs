use log::{info, warn};
use shared::{BreedPrediction, DogAttributes};

use crate::breed::blend::blend_attributes;
use crate::breed::classifier::RawClassification;
use crate::breed::config::ScoringConfig;
use crate::breed::normalize::{AnalysisError, normalize_scores};
use crate::breed::profiles::BreedCatalog;
use crate::breed::resolver::BreedResolver;

#[derive(Debug, Clone)]
pub struct BreedAnalysis {
    pub predictions: Vec<BreedPrediction>,
    pub attributes: DogAttributes,
}

/// Full scoring pipeline: linear normalization, catalog resolution, then
/// exponential re-weighting and attribute blending, composed as explicit
/// stages over immutable inputs.
///
/// Only the confidence gate aborts. Breeds that fail resolution are logged
/// and excluded from the blend but stay visible in the prediction list;
/// with no resolutions at all the attributes degrade to neutral values.
pub fn analyze(
    raw: &[RawClassification],
    catalog: &BreedCatalog,
    config: &ScoringConfig,
) -> Result<BreedAnalysis, AnalysisError> {
    let normalized = normalize_scores(raw, config)?;
    info!("Raw predictions: {:?}", raw);
    info!("Normalized predictions: {:?}", normalized);

    let resolver = BreedResolver::default();
    let resolved: Vec<_> = normalized
        .iter()
        .map(|prediction| resolver.resolve(&prediction.name, catalog))
        .collect();

    for (prediction, profile) in normalized.iter().zip(&resolved) {
        match profile {
            Some(profile) => info!(
                "Matched breed: {} -> {} ({}%)",
                prediction.name, profile.name, prediction.probability
            ),
            None => warn!("No match found for breed: {}", prediction.name),
        }
    }

    let blended = blend_attributes(&normalized, &resolved, config);
    if !blended.any_resolved {
        warn!("No breeds matched in attribute data. Using default values.");
    }

    Ok(BreedAnalysis {
        predictions: blended.predictions,
        attributes: blended.attributes,
    })
}
