use crate::parsing::normalize::char_window;
use crate::parsing::numerals;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Characters searched after a bearing before widening the search.
pub const NEAR_WINDOW_CHARS: usize = 200;
/// Characters searched after a bearing before giving up on its distance.
pub const WIDE_WINDOW_CHARS: usize = 1000;

const UNITS: &str = r"(?:metros|mts|m)\b\.?";

/// "distancia de veintidós punto ochenta y dos metros", "distancias: 12,5 m".
static KEYWORD_DISTANCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?i){}", keyword_pattern())).expect("distance pattern is valid")
});

/// A keyword distance, or a bare digit run followed by a unit ("22.82 m").
static ANY_DISTANCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i){}|(?P<bare>\d+(?:[.,]\d+)*)\s*{UNITS}",
        keyword_pattern()
    ))
    .expect("distance pattern is valid")
});

fn keyword_pattern() -> String {
    format!(
        r"\bdistancias?\s*(?:de\s+|:\s*)?(?P<dist>{})\s*{UNITS}",
        numerals::phrase_pattern()
    )
}

/// A distance phrase found in the text.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceHit {
    pub meters: f64,
    /// Byte range of the phrase in the searched text.
    pub start: usize,
    pub end: usize,
}

/// Find the distance that belongs to a bearing ending at byte `from`.
///
/// The first phrase within [`NEAR_WINDOW_CHARS`] wins; failing that the
/// search is repeated over [`WIDE_WINDOW_CHARS`].
pub fn find_distance_after(text: &str, from: usize) -> Option<DistanceHit> {
    if let Some(hit) = first_in_window(text, from, NEAR_WINDOW_CHARS) {
        return Some(hit);
    }
    let hit = first_in_window(text, from, WIDE_WINDOW_CHARS);
    if hit.is_some() {
        tracing::debug!(offset = from, "distance found only in the wide window");
    }
    hit
}

fn first_in_window(text: &str, from: usize, max_chars: usize) -> Option<DistanceHit> {
    let window = char_window(text, from, max_chars);
    let caps = ANY_DISTANCE_RE.captures(window)?;
    let whole = caps.get(0)?;
    Some(DistanceHit {
        meters: distance_value(&caps)?,
        start: from + whole.start(),
        end: from + whole.end(),
    })
}

/// Every keyword distance phrase in the text, in order.
pub fn keyword_distances(text: &str) -> Vec<DistanceHit> {
    KEYWORD_DISTANCE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(DistanceHit {
                meters: distance_value(&caps)?,
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// `None` when the number cannot be read unambiguously, so a malformed
/// figure is never reported as a measured distance.
fn distance_value(caps: &Captures<'_>) -> Option<f64> {
    caps.name("dist")
        .or_else(|| caps.name("bare"))
        .and_then(|m| numerals::resolve(m.as_str()))
}
