pub mod engine;
pub mod outcome;

pub use crate::tolerances::schema::{Alignment, Tolerances};
pub use engine::{compare, compare_with};
pub use outcome::{ComparisonEntry, ComparisonReport, MatchStatus};

use serde::{Deserialize, Serialize};

/// Everything that can be tuned about a comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareOptions {
    #[serde(default)]
    pub tolerances: Tolerances,
    #[serde(default)]
    pub alignment: Alignment,
}
