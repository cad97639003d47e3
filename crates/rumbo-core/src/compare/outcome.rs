use serde::{Deserialize, Serialize};
use std::fmt;

/// How a paired deed/plan record compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Match,
    DistanceMismatch,
    BearingMismatch,
    /// Only produced by positional alignment, which checks both dimensions.
    BothMismatch,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::Match => write!(f, "match"),
            MatchStatus::DistanceMismatch => write!(f, "distance_mismatch"),
            MatchStatus::BearingMismatch => write!(f, "bearing_mismatch"),
            MatchStatus::BothMismatch => write!(f, "both_mismatch"),
        }
    }
}

/// One deed record aligned against a plan record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    /// Position in the deed (escritura) sequence.
    pub escritura_index: usize,
    /// Position in the plan (plano) sequence.
    pub plano_index: Option<usize>,
    /// Absolute distance difference in metres, when both sides have one.
    pub distance_diff: Option<f64>,
    /// Shortest angular difference in degrees, when both sides have one.
    pub bearing_diff: Option<f64>,
    pub status: MatchStatus,
}

/// The outcome of comparing a deed sequence with a plan sequence.
///
/// Every deed index and every plan index appears in exactly one bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub matches: Vec<ComparisonEntry>,
    pub distance_errors: Vec<ComparisonEntry>,
    pub bearing_errors: Vec<ComparisonEntry>,
    /// Deed indices left without a plan record.
    pub unmatched_deed: Vec<usize>,
    /// Plan indices never paired with a deed record.
    pub unmatched_plan: Vec<usize>,
}

impl ComparisonReport {
    /// True when every record on both sides was paired and agreed.
    pub fn is_consistent(&self) -> bool {
        self.distance_errors.is_empty()
            && self.bearing_errors.is_empty()
            && self.unmatched_deed.is_empty()
            && self.unmatched_plan.is_empty()
    }

    /// Number of discrepancies of any kind.
    pub fn error_count(&self) -> usize {
        self.distance_errors.len()
            + self.bearing_errors.len()
            + self.unmatched_deed.len()
            + self.unmatched_plan.len()
    }

    /// All paired entries ordered by deed index.
    pub fn paired_entries(&self) -> Vec<&ComparisonEntry> {
        let mut entries: Vec<&ComparisonEntry> = self
            .matches
            .iter()
            .chain(&self.distance_errors)
            .chain(&self.bearing_errors)
            .collect();
        entries.sort_by_key(|e| e.escritura_index);
        entries
    }

    pub(crate) fn push(&mut self, entry: ComparisonEntry) {
        match entry.status {
            MatchStatus::Match => self.matches.push(entry),
            MatchStatus::DistanceMismatch | MatchStatus::BothMismatch => {
                self.distance_errors.push(entry)
            }
            MatchStatus::BearingMismatch => self.bearing_errors.push(entry),
        }
    }
}
