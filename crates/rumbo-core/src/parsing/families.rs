use crate::angles::{to_azimuth, PrimaryHemisphere, SecondaryHemisphere, SexagesimalAngle};
use crate::model::MeasurementRecord;
use crate::parsing::distance::{find_distance_after, keyword_distances};
use crate::parsing::numerals;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// One way of writing bearings and distances.
///
/// Families are tried in priority order by the recognizer; the first one
/// that produces any record is used for the whole text.
pub trait PatternFamily: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// All records this family recognizes, in source order. Empty when the
    /// family does not apply to the text.
    fn try_match(&self, text: &str) -> Vec<MeasurementRecord>;
}

const SECONDS_MARK: &str = r#"(?:"|″|”|''|′′|’’)"#;
const SECONDARY_WORDS: &str = "este|oeste|oriente|poniente|occidente";
/// Between the parts of a spelled-out bearing: "grados, treinta minutos",
/// "grados y treinta minutos".
const JOIN: &str = r"[\s,]+(?:y[\s,]+)?";

/// `N83°28'44"E 22.82 m`: direction letters around a symbolic DMS angle,
/// optionally followed by the distance.
pub struct CompactSymbolic;

static COMPACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?P<h1>(?i:norte|sur)\b|[NSns])\s*(?P<deg>\d{{1,3}}(?:[.,]\d+)?)\s*[°º]\s*(?:(?P<min>\d{{1,2}})\s*['′’]\s*(?:(?P<sec>\d{{1,2}}(?:[.,]\d+)?)\s*{SECONDS_MARK}\s*)?)?(?P<h2>(?i:{SECONDARY_WORDS})\b|[EOW]|[eow]\b)(?:\s*,?\s*(?P<dist>\d+(?:[.,]\d+)*)\s*(?:metros|mts|m)\b\.?)?"
    ))
    .expect("compact bearing pattern is valid")
});

impl PatternFamily for CompactSymbolic {
    fn name(&self) -> &'static str {
        "compact"
    }

    fn try_match(&self, text: &str) -> Vec<MeasurementRecord> {
        COMPACT_RE
            .captures_iter(text)
            .map(|caps| {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                let end = caps.get(0).map_or(0, |m| m.end());
                let distance = match caps.name("dist") {
                    Some(d) => numerals::resolve(d.as_str()),
                    None => find_distance_after(text, end).map(|hit| hit.meters),
                };
                MeasurementRecord::new(Some(quadrant_azimuth(&caps)), distance, whole)
            })
            .collect()
    }
}

/// "Norte ochenta y tres grados veintiocho minutos cuarenta y cuatro
/// segundos Este": every number may be digits or words.
pub struct WordGrammar;

static WORD_GRAMMAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    let phrase = numerals::phrase_pattern();
    Regex::new(&format!(
        r"(?i)(?:\b(?P<h1>norte|sur)[\s,]+)?(?P<deg>{phrase})\s*grados?\b(?:{JOIN}(?P<min>{phrase})\s*minutos?\b)?(?:{JOIN}(?P<sec>{phrase})\s*segundos?\b)?(?:{JOIN}(?P<h2>{SECONDARY_WORDS})\b)?"
    ))
    .expect("word bearing pattern is valid")
});

impl PatternFamily for WordGrammar {
    fn name(&self) -> &'static str {
        "word-grammar"
    }

    fn try_match(&self, text: &str) -> Vec<MeasurementRecord> {
        WORD_GRAMMAR_RE
            .captures_iter(text)
            .map(|caps| {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                let end = caps.get(0).map_or(0, |m| m.end());
                let distance = find_distance_after(text, end).map(|hit| hit.meters);
                MeasurementRecord::new(Some(quadrant_azimuth(&caps)), distance, whole)
            })
            .collect()
    }
}

/// `83°28'44"` with no direction: the angle is taken as the azimuth.
pub struct DmsSymbolic;

static DMS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?P<deg>\d{{1,3}})\s*[°º]\s*(?P<min>\d{{1,2}})\s*['′’]\s*(?P<sec>\d{{1,2}}(?:[.,]\d+)?)\s*{SECONDS_MARK}?"
    ))
    .expect("DMS pattern is valid")
});

impl PatternFamily for DmsSymbolic {
    fn name(&self) -> &'static str {
        "dms"
    }

    fn try_match(&self, text: &str) -> Vec<MeasurementRecord> {
        DMS_RE
            .captures_iter(text)
            .map(|caps| {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                let end = caps.get(0).map_or(0, |m| m.end());
                let azimuth = to_azimuth(None, angle(&caps).decimal_degrees(), None);
                let distance = find_distance_after(text, end).map(|hit| hit.meters);
                MeasurementRecord::new(Some(azimuth), distance, whole)
            })
            .collect()
    }
}

/// Last resort: every "distancia ... metros" phrase, without bearing.
pub struct DistanceOnly;

impl PatternFamily for DistanceOnly {
    fn name(&self) -> &'static str {
        "distance-only"
    }

    fn try_match(&self, text: &str) -> Vec<MeasurementRecord> {
        keyword_distances(text)
            .into_iter()
            .map(|hit| MeasurementRecord::new(None, Some(hit.meters), &text[hit.start..hit.end]))
            .collect()
    }
}

/// The built-in families, most specific first.
pub fn default_families() -> Vec<Box<dyn PatternFamily>> {
    vec![
        Box::new(CompactSymbolic),
        Box::new(WordGrammar),
        Box::new(DmsSymbolic),
        Box::new(DistanceOnly),
    ]
}

fn angle(caps: &Captures<'_>) -> SexagesimalAngle {
    SexagesimalAngle::from_phrases(
        caps.name("deg").map_or("", |m| m.as_str()),
        caps.name("min").map(|m| m.as_str()),
        caps.name("sec").map(|m| m.as_str()),
    )
}

fn quadrant_azimuth(caps: &Captures<'_>) -> f64 {
    let primary = caps
        .name("h1")
        .and_then(|m| PrimaryHemisphere::from_str_loose(m.as_str()));
    let secondary = caps
        .name("h2")
        .and_then(|m| SecondaryHemisphere::from_str_loose(m.as_str()));
    to_azimuth(primary, angle(caps).decimal_degrees(), secondary)
}
