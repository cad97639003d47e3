//! Spanish cardinal number words to numbers.
//!
//! The lexicon is a closed enum; a phrase is resolved word by word through a
//! small accumulator so the "mil" scale carry can be tested on its own.

use crate::parsing::normalize::fold_word;
use regex::Regex;
use std::sync::LazyLock;

/// Every cardinal word the converter knows, keyed by meaning rather than
/// spelling ("un", "uno" and "una" are all [`NumeralWord::Uno`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumeralWord {
    Cero,
    Uno,
    Dos,
    Tres,
    Cuatro,
    Cinco,
    Seis,
    Siete,
    Ocho,
    Nueve,
    Diez,
    Once,
    Doce,
    Trece,
    Catorce,
    Quince,
    Dieciseis,
    Diecisiete,
    Dieciocho,
    Diecinueve,
    Veinte,
    Veintiuno,
    Veintidos,
    Veintitres,
    Veinticuatro,
    Veinticinco,
    Veintiseis,
    Veintisiete,
    Veintiocho,
    Veintinueve,
    Treinta,
    Cuarenta,
    Cincuenta,
    Sesenta,
    Setenta,
    Ochenta,
    Noventa,
    Cien,
    Doscientos,
    Trescientos,
    Cuatrocientos,
    Quinientos,
    Seiscientos,
    Setecientos,
    Ochocientos,
    Novecientos,
    Mil,
}

/// Accent-free spellings accepted for each word.
pub const SPELLINGS: &[(&str, NumeralWord)] = &[
    ("cero", NumeralWord::Cero),
    ("un", NumeralWord::Uno),
    ("uno", NumeralWord::Uno),
    ("una", NumeralWord::Uno),
    ("dos", NumeralWord::Dos),
    ("tres", NumeralWord::Tres),
    ("cuatro", NumeralWord::Cuatro),
    ("cinco", NumeralWord::Cinco),
    ("seis", NumeralWord::Seis),
    ("siete", NumeralWord::Siete),
    ("ocho", NumeralWord::Ocho),
    ("nueve", NumeralWord::Nueve),
    ("diez", NumeralWord::Diez),
    ("once", NumeralWord::Once),
    ("doce", NumeralWord::Doce),
    ("trece", NumeralWord::Trece),
    ("catorce", NumeralWord::Catorce),
    ("quince", NumeralWord::Quince),
    ("dieciseis", NumeralWord::Dieciseis),
    ("diecisiete", NumeralWord::Diecisiete),
    ("dieciocho", NumeralWord::Dieciocho),
    ("diecinueve", NumeralWord::Diecinueve),
    ("veinte", NumeralWord::Veinte),
    ("veintiun", NumeralWord::Veintiuno),
    ("veintiuno", NumeralWord::Veintiuno),
    ("veintiuna", NumeralWord::Veintiuno),
    ("veintidos", NumeralWord::Veintidos),
    ("veintitres", NumeralWord::Veintitres),
    ("veinticuatro", NumeralWord::Veinticuatro),
    ("veinticinco", NumeralWord::Veinticinco),
    ("veintiseis", NumeralWord::Veintiseis),
    ("veintisiete", NumeralWord::Veintisiete),
    ("veintiocho", NumeralWord::Veintiocho),
    ("veintinueve", NumeralWord::Veintinueve),
    ("treinta", NumeralWord::Treinta),
    ("cuarenta", NumeralWord::Cuarenta),
    ("cincuenta", NumeralWord::Cincuenta),
    ("sesenta", NumeralWord::Sesenta),
    ("setenta", NumeralWord::Setenta),
    ("ochenta", NumeralWord::Ochenta),
    ("noventa", NumeralWord::Noventa),
    ("cien", NumeralWord::Cien),
    ("ciento", NumeralWord::Cien),
    ("doscientos", NumeralWord::Doscientos),
    ("doscientas", NumeralWord::Doscientos),
    ("trescientos", NumeralWord::Trescientos),
    ("trescientas", NumeralWord::Trescientos),
    ("cuatrocientos", NumeralWord::Cuatrocientos),
    ("cuatrocientas", NumeralWord::Cuatrocientos),
    ("quinientos", NumeralWord::Quinientos),
    ("quinientas", NumeralWord::Quinientos),
    ("seiscientos", NumeralWord::Seiscientos),
    ("seiscientas", NumeralWord::Seiscientos),
    ("setecientos", NumeralWord::Setecientos),
    ("setecientas", NumeralWord::Setecientos),
    ("ochocientos", NumeralWord::Ochocientos),
    ("ochocientas", NumeralWord::Ochocientos),
    ("novecientos", NumeralWord::Novecientos),
    ("novecientas", NumeralWord::Novecientos),
    ("mil", NumeralWord::Mil),
];

/// Word joining the integer and fractional halves: "veintidós punto ochenta".
const DECIMAL_WORD: &str = "punto";

impl NumeralWord {
    pub fn value(self) -> u64 {
        use NumeralWord::*;
        match self {
            Cero => 0,
            Uno => 1,
            Dos => 2,
            Tres => 3,
            Cuatro => 4,
            Cinco => 5,
            Seis => 6,
            Siete => 7,
            Ocho => 8,
            Nueve => 9,
            Diez => 10,
            Once => 11,
            Doce => 12,
            Trece => 13,
            Catorce => 14,
            Quince => 15,
            Dieciseis => 16,
            Diecisiete => 17,
            Dieciocho => 18,
            Diecinueve => 19,
            Veinte => 20,
            Veintiuno => 21,
            Veintidos => 22,
            Veintitres => 23,
            Veinticuatro => 24,
            Veinticinco => 25,
            Veintiseis => 26,
            Veintisiete => 27,
            Veintiocho => 28,
            Veintinueve => 29,
            Treinta => 30,
            Cuarenta => 40,
            Cincuenta => 50,
            Sesenta => 60,
            Setenta => 70,
            Ochenta => 80,
            Noventa => 90,
            Cien => 100,
            Doscientos => 200,
            Trescientos => 300,
            Cuatrocientos => 400,
            Quinientos => 500,
            Seiscientos => 600,
            Setecientos => 700,
            Ochocientos => 800,
            Novecientos => 900,
            Mil => 1000,
        }
    }

    /// Scale words multiply everything accumulated before them.
    pub fn is_scale(self) -> bool {
        self == NumeralWord::Mil
    }

    /// Look up a single word, ignoring case and accents.
    pub fn from_word(word: &str) -> Option<NumeralWord> {
        let folded = fold_word(word);
        SPELLINGS
            .iter()
            .find(|(spelling, _)| *spelling == folded)
            .map(|&(_, w)| w)
    }
}

/// Running state while reading a number phrase left to right.
#[derive(Debug, Default)]
struct Accumulator {
    total: u64,
    current: u64,
    hits: usize,
}

impl Accumulator {
    fn push(&mut self, word: NumeralWord) {
        if word.is_scale() {
            // "mil" on its own means one thousand
            let multiplier = if self.current == 0 { 1 } else { self.current };
            self.total += multiplier * word.value();
            self.current = 0;
        } else {
            self.current += word.value();
        }
        self.hits += 1;
    }

    fn finish(self) -> Option<u64> {
        (self.hits > 0).then_some(self.total + self.current)
    }
}

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)*").expect("digit pattern is valid"));

/// Convert a number phrase to a value, falling back to 0 when nothing in it
/// is recognized. Callers must read 0 as "unresolved", not as a measured
/// zero; use [`resolve`] to tell the two apart.
pub fn convert(phrase: &str) -> f64 {
    resolve(phrase).unwrap_or(0.0)
}

/// Convert a number phrase, or `None` if it holds no digits and no lexicon
/// word.
///
/// - A digit run wins over any words: "22,82" and "aprox. 22.82" give 22.82.
/// - "<integer> punto <fraction>" gives integer + fraction / 100, whatever
///   the size of the fraction phrase.
/// - Hyphens, commas and the conjunction "y" only separate words.
pub fn resolve(phrase: &str) -> Option<f64> {
    if let Some(m) = DIGITS_RE.find(phrase) {
        let value = parse_digit_run(m.as_str());
        if value.is_none() {
            tracing::debug!(run = m.as_str(), "ambiguous digit grouping");
        }
        return value;
    }

    let folded = fold_word(phrase).replace(['-', ','], " ");
    let tokens: Vec<&str> = folded.split_whitespace().collect();

    let (int_tokens, frac_tokens) = match tokens.iter().position(|t| *t == DECIMAL_WORD) {
        Some(idx) => (&tokens[..idx], Some(&tokens[idx + 1..])),
        None => (&tokens[..], None),
    };

    let int_value = accumulate(int_tokens);
    let frac_value = frac_tokens.and_then(accumulate);

    match (int_value, frac_value) {
        (None, None) => {
            tracing::trace!(phrase, "number phrase not recognized");
            None
        }
        (i, f) => Some(i.unwrap_or(0) as f64 + f.unwrap_or(0) as f64 / 100.0),
    }
}

/// Read a digit run with `.`/`,` separators.
///
/// One separator is the decimal mark. With several, the last one is the
/// decimal mark when it differs from the others, which must then all be
/// the same thousands mark; when all are equal they are thousands marks.
/// Every group after the first thousands mark must have three digits.
fn parse_digit_run(run: &str) -> Option<f64> {
    let marks: Vec<(usize, char)> = run
        .char_indices()
        .filter(|(_, c)| matches!(c, '.' | ','))
        .collect();

    let (int_part, frac_part) = match marks.as_slice() {
        [] => (run, None),
        [(idx, _)] => (&run[..*idx], Some(&run[idx + 1..])),
        [rest @ .., (last_idx, last)] => {
            let thousands = rest[0].1;
            if rest.iter().any(|(_, c)| *c != thousands) {
                return None;
            }
            if *last == thousands {
                (run, None)
            } else {
                (&run[..*last_idx], Some(&run[last_idx + 1..]))
            }
        }
    };

    let mut groups = int_part.split(['.', ',']);
    let mut digits = groups.next()?.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        digits.push_str(group);
    }
    if let Some(frac) = frac_part {
        digits.push('.');
        digits.push_str(frac);
    }
    digits.parse::<f64>().ok()
}

fn accumulate(tokens: &[&str]) -> Option<u64> {
    let mut acc = Accumulator::default();
    for token in tokens {
        if *token == "y" {
            continue;
        }
        if let Some(word) = NumeralWord::from_word(token) {
            acc.push(word);
        }
    }
    acc.finish()
}

/// Regex fragment matching one lexicon word, accented or not.
fn word_alternation() -> String {
    let mut spellings: Vec<&str> = SPELLINGS.iter().map(|(s, _)| *s).collect();
    spellings.sort_by_key(|s| std::cmp::Reverse(s.len()));
    let alternatives: Vec<String> = spellings.into_iter().map(accent_tolerant).collect();
    format!(r"\b(?:{})\b", alternatives.join("|"))
}

fn accent_tolerant(spelling: &str) -> String {
    spelling
        .chars()
        .map(|c| match c {
            'a' => "[aá]".to_string(),
            'e' => "[eé]".to_string(),
            'i' => "[ií]".to_string(),
            'o' => "[oó]".to_string(),
            'u' => "[uúü]".to_string(),
            other => other.to_string(),
        })
        .collect()
}

/// Regex fragment for a run of number words: "cuarenta y cinco",
/// "dos mil trescientos", "treinta-y-uno".
pub(crate) fn word_run_pattern() -> String {
    let word = word_alternation();
    format!(r"{word}(?:(?:\s+|\s*-\s*)(?:y(?:\s+|\s*-\s*))?{word})*")
}

/// Regex fragment for any number phrase: a digit run (comma or dot
/// decimals) or a word run with an optional "punto" fraction. No capture
/// groups; callers wrap it in their own named group.
pub(crate) fn phrase_pattern() -> String {
    let run = word_run_pattern();
    format!(r"(?:\d+(?:[.,]\d+)*|{run}(?:\s+{DECIMAL_WORD}\s+{run})?)")
}
