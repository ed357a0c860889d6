use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Reference record for one breed. Every value is on a 0-10 scale
/// (lifespan is pre-scaled in the data file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeProfile {
    pub name: String,
    pub size: f32,
    pub weight: f32,
    pub aggression: f32,
    pub trainability: f32,
    pub energy_level: f32,
    pub lifespan: f32,
}

lazy_static! {
    /// Classifier vocabulary mapped to catalog names. Keys are the exact
    /// underscore-form labels the model emits; the table is consulted
    /// before any fuzzy matching so curated pairings win over lexical
    /// similarity.
    pub static ref BREED_ALIASES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("Flat-coated_retriever", "Chesapeake Bay Retriever");
        m.insert("Labrador_retriever", "Labrador Retriever");
        m.insert("Golden_retriever", "Golden Retriever");
        m.insert("Icelandic_sheepdog", "Shetland Sheepdog");
        m.insert("Belgian_sheepdog", "German Shepherd");
        m.insert("Border_collie", "Border Collie");
        m.insert("Bernese_mountain_dog", "Bernese Mountain Dog");
        m.insert("Siberian_husky", "Siberian Husky");
        m.insert("Great_pyrenees", "Great Dane");
        m.insert("Basset_hound", "Basset Hound");
        m.insert("Beagle", "Beagle");
        m.insert("Poodle", "Poodle");
        m.insert("Boxer", "Boxer");
        m.insert("Bulldog", "Bulldog");
        m.insert("Rottweiler", "Rottweiler");
        m.insert("German_shepherd", "German Shepherd");
        m.insert("Doberman", "Doberman Pinscher");
        m.insert("Chihuahua", "Chihuahua");
        m.insert("Pug", "Pug");
        m.insert("Shih-tzu", "Shih Tzu");
        m.insert("Pomeranian", "Pomeranian");
        m.insert("French_bulldog", "French Bulldog");
        m.insert("Pembroke_welsh_corgi", "Pembroke Welsh Corgi");
        m
    };
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to locate catalog data: {0}")]
    Location(String),
    #[error("Failed to read catalog data: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The static reference data, immutable for the process lifetime. Lookup
/// order in the backing list is significant: the fuzzier resolver
/// strategies take the first hit.
#[derive(Debug, Clone)]
pub struct BreedCatalog {
    profiles: Vec<AttributeProfile>,
}

impl BreedCatalog {
    pub fn load() -> Result<Self, CatalogError> {
        let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
            .map_err(|_| CatalogError::Location("CARGO_MANIFEST_DIR is not set".to_string()))?;
        let data_path = format!("{}/data/breed_attributes.json", manifest_dir);
        let data = std::fs::read_to_string(data_path)?;
        let profiles: Vec<AttributeProfile> = serde_json::from_str(&data)?;
        Ok(Self { profiles })
    }

    pub fn from_profiles(profiles: Vec<AttributeProfile>) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &[AttributeProfile] {
        &self.profiles
    }

    pub fn by_name(&self, name: &str) -> Option<&AttributeProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_data_file_loads() {
        let catalog = BreedCatalog::load().unwrap();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn every_alias_targets_an_existing_profile() {
        let catalog = BreedCatalog::load().unwrap();
        for (label, canonical) in BREED_ALIASES.iter() {
            assert!(
                catalog.by_name(canonical).is_some(),
                "alias {} points at missing profile {}",
                label,
                canonical
            );
        }
    }

    #[test]
    fn all_attribute_values_are_on_the_ten_point_scale() {
        let catalog = BreedCatalog::load().unwrap();
        for profile in catalog.profiles() {
            for value in [
                profile.size,
                profile.weight,
                profile.aggression,
                profile.trainability,
                profile.energy_level,
                profile.lifespan,
            ] {
                assert!(
                    (0.0..=10.0).contains(&value),
                    "{} has out-of-range value {}",
                    profile.name,
                    value
                );
            }
        }
    }
}
