use shared::BreedPrediction;

use crate::breed::classifier::RawClassification;
use crate::breed::config::ScoringConfig;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The confidence gate tripped: nothing in the candidate list looks
    /// like a clear dog. The message is surfaced to the user verbatim.
    #[error(
        "The uploaded image does not appear to contain a clear dog. Please upload a clear photo of a dog."
    )]
    LowConfidence { max_score: f32 },
}

/// Linear pass: raw classifier scores become integer percentages summing
/// to (approximately) 100.
///
/// Each value is rounded independently and the list is deliberately not
/// re-normalized afterwards, so the displayed sum can drift from 100 by up
/// to one per candidate.
pub fn normalize_scores(
    raw: &[RawClassification],
    config: &ScoringConfig,
) -> Result<Vec<BreedPrediction>, AnalysisError> {
    let max_score = raw.iter().map(|c| c.score).fold(0.0f32, f32::max);
    if raw.is_empty() || max_score < config.confidence_threshold {
        return Err(AnalysisError::LowConfidence { max_score });
    }

    let total: f32 = raw.iter().map(|c| c.score).sum();
    Ok(raw
        .iter()
        .map(|c| BreedPrediction {
            name: c.label.clone(),
            probability: (c.score / total * 100.0).round() as u8,
        })
        .collect())
}
