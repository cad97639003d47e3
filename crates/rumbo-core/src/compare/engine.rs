use crate::angles::angular_diff;
use crate::compare::outcome::{ComparisonEntry, ComparisonReport, MatchStatus};
use crate::compare::CompareOptions;
use crate::model::{round_dp, MeasurementRecord};
use crate::tolerances::schema::{Alignment, Tolerances};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Decimal places kept for reported differences; tolerances are checked
/// against the rounded value.
const DIFF_DP: u32 = 6;

/// Compare a deed sequence against a plan sequence with greedy
/// nearest-available alignment.
pub fn compare(
    deed: &[MeasurementRecord],
    plan: &[MeasurementRecord],
    tolerances: &Tolerances,
) -> ComparisonReport {
    compare_greedy(deed, plan, tolerances)
}

/// Compare with an explicit alignment strategy.
pub fn compare_with(
    deed: &[MeasurementRecord],
    plan: &[MeasurementRecord],
    options: &CompareOptions,
) -> ComparisonReport {
    let positional = match options.alignment {
        Alignment::Greedy => false,
        Alignment::Positional => true,
        Alignment::Auto => !deed.is_empty() && deed.len() == plan.len(),
    };
    let report = if positional {
        compare_positional(deed, plan, &options.tolerances)
    } else {
        compare_greedy(deed, plan, &options.tolerances)
    };
    tracing::debug!(
        alignment = %options.alignment,
        positional,
        deed = deed.len(),
        plan = plan.len(),
        matches = report.matches.len(),
        errors = report.error_count(),
        "comparison finished"
    );
    report
}

/// One pass over the deed: each record takes the cheapest plan record not
/// yet used. Not a globally optimal assignment.
fn compare_greedy(
    deed: &[MeasurementRecord],
    plan: &[MeasurementRecord],
    tolerances: &Tolerances,
) -> ComparisonReport {
    let mut report = ComparisonReport::default();
    let mut used = vec![false; plan.len()];

    for (i, d) in deed.iter().enumerate() {
        match best_candidate(d, plan, &used) {
            Some(j) => {
                used[j] = true;
                let entry = entry(i, j, d, &plan[j], |dist, bear| {
                    classify(dist, bear, tolerances)
                });
                report.push(entry);
            }
            None => report.unmatched_deed.push(i),
        }
    }

    report.unmatched_plan = unused_indices(&used);
    report
}

/// Pair records by position. Both dimensions are checked, so a pair can
/// fail on both.
fn compare_positional(
    deed: &[MeasurementRecord],
    plan: &[MeasurementRecord],
    tolerances: &Tolerances,
) -> ComparisonReport {
    let mut report = ComparisonReport::default();
    let mut used = vec![false; plan.len()];

    for (i, d) in deed.iter().enumerate() {
        match plan.get(i) {
            Some(p) => {
                used[i] = true;
                report.push(entry(i, i, d, p, |dist, bear| {
                    classify_both(dist, bear, tolerances)
                }));
            }
            None => report.unmatched_deed.push(i),
        }
    }

    report.unmatched_plan = unused_indices(&used);
    report
}

fn entry(
    deed_idx: usize,
    plan_idx: usize,
    d: &MeasurementRecord,
    p: &MeasurementRecord,
    status: impl Fn(Option<f64>, Option<f64>) -> MatchStatus,
) -> ComparisonEntry {
    let distance_diff = distance_diff(d, p).map(|v| round_dp(v, DIFF_DP));
    let bearing_diff = bearing_diff(d, p).map(|v| round_dp(v, DIFF_DP));
    ComparisonEntry {
        escritura_index: deed_idx,
        plano_index: Some(plan_idx),
        distance_diff,
        bearing_diff,
        status: status(distance_diff, bearing_diff),
    }
}

/// Lowest-cost unused plan index; ties go to the earliest index.
fn best_candidate(
    d: &MeasurementRecord,
    plan: &[MeasurementRecord],
    used: &[bool],
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (j, p) in plan.iter().enumerate() {
        if used[j] {
            continue;
        }
        let cost = pair_cost(d, p);
        if best.map_or(true, |(_, best_cost)| cost < best_cost) {
            best = Some((j, cost));
        }
    }
    best.map(|(j, _)| j)
}

/// Metres plus degrees; a dimension missing on either side adds nothing.
fn pair_cost(a: &MeasurementRecord, b: &MeasurementRecord) -> f64 {
    distance_diff(a, b).unwrap_or(0.0) + bearing_diff(a, b).unwrap_or(0.0)
}

fn distance_diff(a: &MeasurementRecord, b: &MeasurementRecord) -> Option<f64> {
    Some((a.distance_m? - b.distance_m?).abs())
}

fn bearing_diff(a: &MeasurementRecord, b: &MeasurementRecord) -> Option<f64> {
    Some(angular_diff(a.azimuth?, b.azimuth?))
}

/// Distance is checked first and a distance failure hides any bearing
/// failure.
fn classify(
    distance_diff: Option<f64>,
    bearing_diff: Option<f64>,
    tolerances: &Tolerances,
) -> MatchStatus {
    if exceeds(distance_diff, tolerances.distance_m) {
        MatchStatus::DistanceMismatch
    } else if exceeds(bearing_diff, tolerances.bearing_deg) {
        MatchStatus::BearingMismatch
    } else {
        MatchStatus::Match
    }
}

fn classify_both(
    distance_diff: Option<f64>,
    bearing_diff: Option<f64>,
    tolerances: &Tolerances,
) -> MatchStatus {
    match (
        exceeds(distance_diff, tolerances.distance_m),
        exceeds(bearing_diff, tolerances.bearing_deg),
    ) {
        (true, true) => MatchStatus::BothMismatch,
        (true, false) => MatchStatus::DistanceMismatch,
        (false, true) => MatchStatus::BearingMismatch,
        (false, false) => MatchStatus::Match,
    }
}

/// A missing difference never exceeds the tolerance. The difference is
/// rounded to [`DIFF_DP`] places first, so float noise such as
/// `10.05 - 10.0` does not fail a 0.05 tolerance, at the cost of also
/// accepting e.g. 0.5000004 against 0.5.
fn exceeds(diff: Option<f64>, tolerance: Decimal) -> bool {
    diff.and_then(Decimal::from_f64)
        .is_some_and(|d| d.round_dp(DIFF_DP) > tolerance)
}

fn unused_indices(used: &[bool]) -> Vec<usize> {
    used.iter()
        .enumerate()
        .filter(|(_, &u)| !u)
        .map(|(j, _)| j)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn rec(azimuth: f64, distance: f64) -> MeasurementRecord {
        MeasurementRecord::new(Some(azimuth), Some(distance), "")
    }

    fn tol() -> Tolerances {
        Tolerances::default()
    }

    fn approx(value: Option<f64>, expected: f64) -> bool {
        value.is_some_and(|v| (v - expected).abs() < 1e-9)
    }

    #[test]
    fn test_within_both_tolerances_is_match() {
        let report = compare(&[rec(10.0, 5.0)], &[rec(10.03, 5.2)], &tol());
        assert_eq!(report.matches.len(), 1);
        let e = &report.matches[0];
        assert_eq!(e.status, MatchStatus::Match);
        assert_eq!(e.plano_index, Some(0));
        assert!(approx(e.distance_diff, 0.2));
        assert!(approx(e.bearing_diff, 0.03));
        assert!(report.is_consistent());
    }

    #[test]
    fn test_distance_takes_priority_over_bearing() {
        let report = compare(&[rec(10.0, 5.0)], &[rec(12.0, 7.0)], &tol());
        assert_eq!(report.distance_errors.len(), 1);
        assert!(report.bearing_errors.is_empty());
        assert_eq!(report.distance_errors[0].status, MatchStatus::DistanceMismatch);
        // both differences are still reported
        assert!(approx(report.distance_errors[0].bearing_diff, 2.0));
    }

    #[test]
    fn test_bearing_mismatch() {
        let report = compare(&[rec(10.0, 5.0)], &[rec(10.2, 5.1)], &tol());
        assert_eq!(report.bearing_errors.len(), 1);
        assert_eq!(report.bearing_errors[0].status, MatchStatus::BearingMismatch);
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive() {
        let report = compare(&[rec(10.0, 5.0)], &[rec(10.05, 5.5)], &tol());
        assert_eq!(report.matches.len(), 1);
    }

    #[test]
    fn test_exceeds_compares_rounded_difference() {
        assert!(!exceeds(Some(10.05 - 10.0), dec!(0.05)));
        assert!(!exceeds(Some(0.5000004), dec!(0.5)));
        assert!(exceeds(Some(0.500001), dec!(0.5)));
        assert!(!exceeds(None, dec!(0)));
    }

    #[test]
    fn test_bearing_diff_wraps_north() {
        let report = compare(&[rec(359.99, 5.0)], &[rec(0.01, 5.0)], &tol());
        assert_eq!(report.matches.len(), 1);
        assert!(approx(report.matches[0].bearing_diff, 0.02));
    }

    #[test]
    fn test_missing_fields_cannot_fail() {
        let deed = [MeasurementRecord::new(None, Some(5.0), "")];
        let plan = [MeasurementRecord::new(Some(200.0), Some(5.1), "")];
        let report = compare(&deed, &plan, &tol());
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].bearing_diff, None);
        assert!(approx(report.matches[0].distance_diff, 0.1));
    }

    #[test]
    fn test_greedy_picks_nearest_unused() {
        let deed = [rec(90.0, 10.0), rec(0.0, 20.0)];
        let plan = [rec(0.0, 20.0), rec(90.0, 10.0)];
        let report = compare(&deed, &plan, &tol());
        assert_eq!(report.matches.len(), 2);
        assert_eq!(report.matches[0].plano_index, Some(1));
        assert_eq!(report.matches[1].plano_index, Some(0));
    }

    #[test]
    fn test_ties_go_to_first_plan_index() {
        let deed = [MeasurementRecord::new(None, None, "")];
        let plan = [rec(10.0, 1.0), rec(20.0, 2.0)];
        let report = compare(&deed, &plan, &tol());
        assert_eq!(report.matches[0].plano_index, Some(0));
        assert_eq!(report.unmatched_plan, vec![1]);
    }

    #[test]
    fn test_greedy_is_not_globally_optimal() {
        // deed 0 has no bearing, ties on both plan records and takes the
        // first, leaving deed 1 with the wrong direction
        let deed = [MeasurementRecord::new(None, Some(10.0), ""), rec(0.0, 10.0)];
        let plan = [rec(0.0, 10.0), rec(90.0, 10.0)];
        let report = compare(&deed, &plan, &tol());
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].plano_index, Some(0));
        assert_eq!(report.bearing_errors.len(), 1);
        assert_eq!(report.bearing_errors[0].plano_index, Some(1));
    }

    #[test]
    fn test_unequal_lengths() {
        let deed = [rec(10.0, 5.0), rec(20.0, 6.0), rec(30.0, 7.0)];
        let plan = [rec(20.0, 6.0)];
        let report = compare(&deed, &plan, &tol());
        // deed 0 is processed first and takes the only plan record
        let paired = report.paired_entries();
        assert_eq!(paired.len(), 1);
        assert_eq!(paired[0].escritura_index, 0);
        assert_eq!(paired[0].status, MatchStatus::DistanceMismatch);
        assert_eq!(report.unmatched_deed, vec![1, 2]);
        assert!(report.unmatched_plan.is_empty());
    }

    #[test]
    fn test_empty_sides() {
        let plan = [rec(10.0, 5.0), rec(20.0, 6.0)];
        let report = compare(&[], &plan, &tol());
        assert!(report.matches.is_empty());
        assert_eq!(report.unmatched_plan, vec![0, 1]);

        let report = compare(&plan, &[], &tol());
        assert!(report.matches.is_empty());
        assert_eq!(report.unmatched_deed, vec![0, 1]);

        assert_eq!(compare(&[], &[], &tol()), ComparisonReport::default());
    }

    #[test]
    fn test_custom_tolerances() {
        let strict = Tolerances {
            distance_m: dec!(0.1),
            bearing_deg: dec!(0.01),
        };
        let report = compare(&[rec(10.0, 5.0)], &[rec(10.0, 5.2)], &strict);
        assert_eq!(report.distance_errors.len(), 1);
    }

    #[test]
    fn test_positional_reports_both_mismatch() {
        let options = CompareOptions {
            tolerances: tol(),
            alignment: Alignment::Positional,
        };
        let deed = [rec(10.0, 5.0), rec(20.0, 6.0)];
        let plan = [rec(12.0, 7.0), rec(20.0, 6.0), rec(30.0, 1.0)];
        let report = compare_with(&deed, &plan, &options);
        assert_eq!(report.distance_errors.len(), 1);
        assert_eq!(report.distance_errors[0].status, MatchStatus::BothMismatch);
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.unmatched_plan, vec![2]);
    }

    #[test]
    fn test_positional_keeps_order_even_when_swapped() {
        let options = CompareOptions {
            tolerances: tol(),
            alignment: Alignment::Positional,
        };
        let deed = [rec(90.0, 10.0), rec(0.0, 20.0)];
        let plan = [rec(0.0, 20.0), rec(90.0, 10.0)];
        let report = compare_with(&deed, &plan, &options);
        assert!(report.matches.is_empty());
        assert_eq!(report.distance_errors.len(), 2);
    }

    #[test]
    fn test_auto_alignment() {
        let options = CompareOptions {
            tolerances: tol(),
            alignment: Alignment::Auto,
        };
        let deed = [rec(90.0, 10.0), rec(0.0, 20.0)];
        let swapped = [rec(0.0, 20.0), rec(90.0, 10.0)];
        // equal lengths: positional
        assert_eq!(compare_with(&deed, &swapped, &options).matches.len(), 0);
        // different lengths: greedy
        let longer = [rec(0.0, 20.0), rec(90.0, 10.0), rec(45.0, 3.0)];
        let report = compare_with(&deed, &longer, &options);
        assert_eq!(report.matches.len(), 2);
        assert_eq!(report.unmatched_plan, vec![2]);
    }

    fn maybe_record() -> impl Strategy<Value = MeasurementRecord> {
        (
            proptest::option::of(0.0f64..360.0),
            proptest::option::of(0.0f64..500.0),
        )
            .prop_map(|(az, d)| MeasurementRecord::new(az, d, ""))
    }

    fn alignment() -> impl Strategy<Value = Alignment> {
        prop_oneof![
            Just(Alignment::Greedy),
            Just(Alignment::Positional),
            Just(Alignment::Auto),
        ]
    }

    proptest! {
        #[test]
        fn every_index_lands_in_exactly_one_bucket(
            deed in proptest::collection::vec(maybe_record(), 0..8),
            plan in proptest::collection::vec(maybe_record(), 0..8),
            alignment in alignment(),
        ) {
            let options = CompareOptions { tolerances: Tolerances::default(), alignment };
            let report = compare_with(&deed, &plan, &options);

            let mut deed_seen = vec![0usize; deed.len()];
            let mut plan_seen = vec![0usize; plan.len()];
            for e in report.paired_entries() {
                deed_seen[e.escritura_index] += 1;
                plan_seen[e.plano_index.unwrap()] += 1;
            }
            for &i in &report.unmatched_deed {
                deed_seen[i] += 1;
            }
            for &j in &report.unmatched_plan {
                plan_seen[j] += 1;
            }
            prop_assert!(deed_seen.iter().all(|&n| n == 1), "deed buckets: {:?}", deed_seen);
            prop_assert!(plan_seen.iter().all(|&n| n == 1), "plan buckets: {:?}", plan_seen);
            prop_assert_eq!(report.paired_entries().len(), deed.len().min(plan.len()));
        }

        #[test]
        fn reported_bearing_diffs_are_half_turn_at_most(
            deed in proptest::collection::vec(maybe_record(), 0..6),
            plan in proptest::collection::vec(maybe_record(), 0..6),
        ) {
            let report = compare(&deed, &plan, &Tolerances::default());
            for e in report.paired_entries() {
                if let Some(b) = e.bearing_diff {
                    prop_assert!((0.0..=180.0).contains(&b));
                }
            }
        }
    }
}
