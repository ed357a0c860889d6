use crate::breed::profiles::{AttributeProfile, BREED_ALIASES, BreedCatalog};

/// One way of mapping a classifier label onto the catalog. Strategies are
/// tried in a fixed order and the first hit wins; the order is
/// behaviorally significant (alias beats exact beats substring beats
/// keyword).
trait MatchStrategy: Send + Sync {
    fn resolve<'a>(&self, label: &str, catalog: &'a BreedCatalog) -> Option<&'a AttributeProfile>;
}

/// Classifier vocabularies and the attribute catalog are curated
/// independently; underscores, casing, and outright naming mismatches are
/// all expected. Layered fallbacks maximize coverage while preferring the
/// most precise match available.
pub struct BreedResolver {
    strategies: Vec<Box<dyn MatchStrategy>>,
}

impl Default for BreedResolver {
    fn default() -> Self {
        Self {
            strategies: vec![
                Box::new(AliasMatch),
                Box::new(ExactMatch),
                Box::new(SubstringMatch),
                Box::new(KeywordMatch),
            ],
        }
    }
}

impl BreedResolver {
    pub fn resolve<'a>(
        &self,
        label: &str,
        catalog: &'a BreedCatalog,
    ) -> Option<&'a AttributeProfile> {
        self.strategies
            .iter()
            .find_map(|strategy| strategy.resolve(label, catalog))
    }
}

fn normalize_label(label: &str) -> String {
    label.replace('_', " ").to_lowercase().trim().to_string()
}

/// Case-sensitive lookup of the raw label in the curated alias table.
struct AliasMatch;

impl MatchStrategy for AliasMatch {
    fn resolve<'a>(&self, label: &str, catalog: &'a BreedCatalog) -> Option<&'a AttributeProfile> {
        BREED_ALIASES
            .get(label)
            .and_then(|canonical| catalog.by_name(canonical))
    }
}

/// Case-insensitive equality after underscore/whitespace normalization.
struct ExactMatch;

impl MatchStrategy for ExactMatch {
    fn resolve<'a>(&self, label: &str, catalog: &'a BreedCatalog) -> Option<&'a AttributeProfile> {
        let normalized = normalize_label(label);
        catalog
            .profiles()
            .iter()
            .find(|profile| profile.name.to_lowercase() == normalized)
    }
}

/// The normalized label contains a catalog name, e.g. "standard poodle"
/// contains "poodle".
struct SubstringMatch;

impl MatchStrategy for SubstringMatch {
    fn resolve<'a>(&self, label: &str, catalog: &'a BreedCatalog) -> Option<&'a AttributeProfile> {
        let normalized = normalize_label(label);
        catalog
            .profiles()
            .iter()
            .find(|profile| normalized.contains(&profile.name.to_lowercase()))
    }
}

/// Last resort: any significant word of the label (longer than 3 chars,
/// tested in original order) appearing inside a catalog name.
struct KeywordMatch;

impl MatchStrategy for KeywordMatch {
    fn resolve<'a>(&self, label: &str, catalog: &'a BreedCatalog) -> Option<&'a AttributeProfile> {
        let normalized = normalize_label(label);
        for word in normalized.split(' ') {
            if word.len() > 3 {
                let hit = catalog
                    .profiles()
                    .iter()
                    .find(|profile| profile.name.to_lowercase().contains(word));
                if hit.is_some() {
                    return hit;
                }
            }
        }
        None
    }
}
