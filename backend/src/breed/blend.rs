use shared::{BreedPrediction, DogAttributes};

use crate::breed::config::ScoringConfig;
use crate::breed::profiles::AttributeProfile;

#[derive(Debug, Clone)]
pub struct BlendResult {
    /// Input predictions with resolved entries re-weighted. Unresolved
    /// entries keep their linear probability, so the displayed sum can
    /// exceed 100 when both kinds are present.
    pub predictions: Vec<BreedPrediction>,
    pub attributes: DogAttributes,
    /// False when nothing resolved and the neutral fallback was used.
    pub any_resolved: bool,
}

/// Exponential pass: sharpens the linear distribution so the leading breed
/// dominates, then blends the resolved breeds' attribute profiles with the
/// same weights.
///
/// Each resolved prediction gets `w = exp(-alpha * (maxProb - p))`; the
/// top breed's weight is exactly 1 and lower-scoring breeds fall off
/// exponentially, suppressing low-confidence tails far more aggressively
/// than the linear scheme. `maxProb` is taken over ALL predictions so an
/// unresolved leader still dampens the resolved ones.
pub fn blend_attributes(
    predictions: &[BreedPrediction],
    resolved: &[Option<&AttributeProfile>],
    config: &ScoringConfig,
) -> BlendResult {
    debug_assert_eq!(predictions.len(), resolved.len());

    let max_prob = predictions.iter().map(|p| p.probability).max().unwrap_or(0);

    let weights: Vec<Option<f32>> = predictions
        .iter()
        .zip(resolved)
        .map(|(prediction, profile)| {
            profile.map(|_| {
                (-config.decay_alpha * f32::from(max_prob - prediction.probability)).exp()
            })
        })
        .collect();
    let total_weight: f32 = weights.iter().flatten().sum();

    let mut predictions = predictions.to_vec();
    if total_weight > 0.0 {
        for (prediction, weight) in predictions.iter_mut().zip(&weights) {
            if let Some(w) = weight {
                prediction.probability = (w / total_weight * 100.0).round() as u8;
            }
        }
    }

    let attributes = if total_weight > 0.0 {
        let mut blended = DogAttributes::uniform(0.0);
        for (profile, weight) in resolved.iter().zip(&weights) {
            if let (Some(profile), Some(w)) = (profile, weight) {
                let share = w / total_weight;
                blended.size += profile.size * share;
                blended.weight += profile.weight * share;
                blended.aggression += profile.aggression * share;
                blended.trainability += profile.trainability * share;
                blended.energy_level += profile.energy_level * share;
                blended.lifespan += profile.lifespan * share;
            }
        }
        round_attributes(blended)
    } else {
        DogAttributes::uniform(config.neutral_attribute)
    };

    BlendResult {
        predictions,
        attributes,
        any_resolved: total_weight > 0.0,
    }
}

fn round_one_decimal(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

fn round_attributes(attributes: DogAttributes) -> DogAttributes {
    DogAttributes {
        size: round_one_decimal(attributes.size),
        weight: round_one_decimal(attributes.weight),
        aggression: round_one_decimal(attributes.aggression),
        trainability: round_one_decimal(attributes.trainability),
        energy_level: round_one_decimal(attributes.energy_level),
        lifespan: round_one_decimal(attributes.lifespan),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(name: &str, probability: u8) -> BreedPrediction {
        BreedPrediction {
            name: name.to_string(),
            probability,
        }
    }

    fn profile(name: &str, size: f32, energy_level: f32) -> AttributeProfile {
        AttributeProfile {
            name: name.to_string(),
            size,
            weight: size,
            aggression: 2.0,
            trainability: 8.0,
            energy_level,
            lifespan: 6.0,
        }
    }

    #[test]
    fn exponential_reweighting_sharpens_the_distribution() {
        let predictions = vec![
            prediction("Labrador_retriever", 60),
            prediction("Golden_retriever", 30),
            prediction("Poodle", 10),
        ];
        let labrador = profile("Labrador Retriever", 6.5, 8.0);
        let golden = profile("Golden Retriever", 6.0, 7.5);
        let poodle = profile("Poodle", 4.5, 7.0);
        let resolved = vec![Some(&labrador), Some(&golden), Some(&poodle)];

        let result = blend_attributes(&predictions, &resolved, &ScoringConfig::default());

        // weights: 1, exp(-6) ~ 0.0025, exp(-10) ~ 0.0000454
        let probabilities: Vec<u8> = result.predictions.iter().map(|p| p.probability).collect();
        assert_eq!(probabilities, vec![100, 0, 0]);
        assert!(result.any_resolved);

        // The blend is dominated by the leader.
        assert_eq!(result.attributes.size, 6.5);
        assert_eq!(result.attributes.energy_level, 8.0);
    }

    #[test]
    fn blended_attributes_stay_within_the_profile_envelope() {
        let predictions = vec![prediction("Beagle", 55), prediction("Boxer", 45)];
        let beagle = profile("Beagle", 3.0, 7.0);
        let boxer = profile("Boxer", 6.0, 8.5);
        let resolved = vec![Some(&beagle), Some(&boxer)];

        let result = blend_attributes(&predictions, &resolved, &ScoringConfig::default());

        assert!(result.attributes.size >= 3.0 && result.attributes.size <= 6.0);
        assert!(result.attributes.energy_level >= 7.0 && result.attributes.energy_level <= 8.5);
    }

    #[test]
    fn single_resolved_prediction_reproduces_its_profile() {
        // The unresolved leader keeps its linear probability while the only
        // resolved breed takes the whole weighted distribution.
        let predictions = vec![prediction("Mystery_hound", 60), prediction("Beagle", 40)];
        let beagle = profile("Beagle", 3.0, 7.0);
        let resolved = vec![None, Some(&beagle)];

        let result = blend_attributes(&predictions, &resolved, &ScoringConfig::default());

        assert_eq!(result.predictions[0].probability, 60);
        assert_eq!(result.predictions[1].probability, 100);
        let expected = DogAttributes {
            size: beagle.size,
            weight: beagle.weight,
            aggression: beagle.aggression,
            trainability: beagle.trainability,
            energy_level: beagle.energy_level,
            lifespan: beagle.lifespan,
        };
        assert_eq!(result.attributes, expected);
    }

    #[test]
    fn zero_resolved_predictions_fall_back_to_neutral_values() {
        let predictions = vec![prediction("Tabby_cat", 70), prediction("Sphynx", 30)];
        let resolved = vec![None, None];

        let result = blend_attributes(&predictions, &resolved, &ScoringConfig::default());

        assert!(!result.any_resolved);
        assert_eq!(result.attributes, DogAttributes::uniform(5.0));
        // Unresolved predictions are untouched.
        assert_eq!(result.predictions[0].probability, 70);
        assert_eq!(result.predictions[1].probability, 30);
    }

    #[test]
    fn near_ties_still_favor_the_leader() {
        let predictions = vec![prediction("Beagle", 51), prediction("Boxer", 49)];
        let beagle = profile("Beagle", 3.0, 7.0);
        let boxer = profile("Boxer", 6.0, 8.5);
        let resolved = vec![Some(&beagle), Some(&boxer)];

        let result = blend_attributes(&predictions, &resolved, &ScoringConfig::default());

        // exp(-0.2 * 2) ~ 0.67: the leader wins 60/40, not winner-take-all.
        assert_eq!(result.predictions[0].probability, 60);
        assert_eq!(result.predictions[1].probability, 40);
    }
}
