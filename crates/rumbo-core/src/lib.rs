pub mod angles;
pub mod compare;
pub mod error;
pub mod model;
pub mod parsing;
pub mod segments;
pub mod tolerances;

use compare::outcome::ComparisonReport;
use compare::CompareOptions;
use model::MeasurementRecord;
use parsing::normalize::truncate_chars;
use serde::{Deserialize, Serialize};

/// Longest source text kept in a [`ComparisonBundle`], in characters.
pub const MAX_BUNDLE_TEXT_CHARS: usize = 10_000;

/// A comparison together with the inputs it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonBundle {
    pub report: ComparisonReport,
    /// Deed text, truncated to [`MAX_BUNDLE_TEXT_CHARS`].
    pub text_escritura: String,
    /// Plan text, truncated to [`MAX_BUNDLE_TEXT_CHARS`].
    pub text_plano: String,
    pub parsed_escritura: Vec<MeasurementRecord>,
    pub parsed_plano: Vec<MeasurementRecord>,
}

/// Extract every bearing/distance pair from a Spanish boundary description.
///
/// Never fails: text without recognizable measurements yields an empty list.
pub fn extract_measurements(text: &str) -> Vec<MeasurementRecord> {
    parsing::extract(text)
}

/// Compare two already-extracted sequences.
pub fn compare_sequences(
    deed: &[MeasurementRecord],
    plan: &[MeasurementRecord],
    options: &CompareOptions,
) -> ComparisonReport {
    compare::compare_with(deed, plan, options)
}

/// Main API entry point: extract both documents and compare them.
///
/// The bundle keeps both parsed sequences and a bounded copy of each
/// source text so a caller can show the evidence behind every discrepancy.
pub fn compare_texts(
    deed_text: &str,
    plan_text: &str,
    options: &CompareOptions,
) -> ComparisonBundle {
    let parsed_escritura = extract_measurements(deed_text);
    let parsed_plano = extract_measurements(plan_text);
    tracing::info!(
        deed_records = parsed_escritura.len(),
        plan_records = parsed_plano.len(),
        "extracted measurements"
    );

    let report = compare_sequences(&parsed_escritura, &parsed_plano, options);

    ComparisonBundle {
        report,
        text_escritura: truncate_chars(deed_text, MAX_BUNDLE_TEXT_CHARS).to_string(),
        text_plano: truncate_chars(plan_text, MAX_BUNDLE_TEXT_CHARS).to_string(),
        parsed_escritura,
        parsed_plano,
    }
}
