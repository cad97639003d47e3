pub mod distance;
pub mod families;
pub mod normalize;
pub mod numerals;

use crate::model::MeasurementRecord;
use families::{default_families, PatternFamily};
use normalize::normalize_text;

/// Extract bearing/distance records from deed or plan text with the
/// built-in pattern families.
pub fn extract(text: &str) -> Vec<MeasurementRecord> {
    Recognizer::default().extract(text)
}

/// An ordered cascade of pattern families.
///
/// The text is scanned by each family in turn and the first family that
/// yields at least one record wins; later families are not consulted, so
/// records from different notations are never mixed.
pub struct Recognizer {
    families: Vec<Box<dyn PatternFamily>>,
}

impl Recognizer {
    pub fn new(families: Vec<Box<dyn PatternFamily>>) -> Self {
        Recognizer { families }
    }

    pub fn family_names(&self) -> Vec<&'static str> {
        self.families.iter().map(|f| f.name()).collect()
    }

    /// Run the cascade. An empty result means no measurements were found,
    /// which is not an error.
    pub fn extract(&self, text: &str) -> Vec<MeasurementRecord> {
        let normalized = normalize_text(text);
        if normalized.is_empty() {
            return Vec::new();
        }

        for family in &self.families {
            let records = family.try_match(&normalized);
            if !records.is_empty() {
                tracing::debug!(
                    family = family.name(),
                    records = records.len(),
                    partial = records.iter().filter(|r| !r.is_complete()).count(),
                    "pattern family matched"
                );
                return records;
            }
            tracing::trace!(family = family.name(), "pattern family found nothing");
        }

        tracing::debug!(chars = normalized.chars().count(), "no measurements found");
        Vec::new()
    }
}

impl Default for Recognizer {
    fn default() -> Self {
        Recognizer::new(default_families())
    }
}
