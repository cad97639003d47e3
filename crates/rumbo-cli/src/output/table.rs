use rumbo_core::compare::outcome::{ComparisonEntry, ComparisonReport, MatchStatus};
use rumbo_core::compare::CompareOptions;
use rumbo_core::model::MeasurementRecord;

const SPAN_WIDTH: usize = 60;

pub fn format_records(records: &[MeasurementRecord]) -> String {
    if records.is_empty() {
        return "No bearings or distances found.".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "  {:>3}  {:>12}  {:>10}  {}\n",
        "#", "Azimuth", "Distance", "Source"
    ));
    out.push_str(&format!("  {}\n", "-".repeat(33 + SPAN_WIDTH)));
    for (i, r) in records.iter().enumerate() {
        let azimuth = r
            .azimuth
            .map(|a| format!("{a:.6}°"))
            .unwrap_or_else(|| "-".into());
        let distance = r
            .distance_m
            .map(|d| format!("{d:.2} m"))
            .unwrap_or_else(|| "-".into());
        out.push_str(&format!(
            "  {:>3}  {:>12}  {:>10}  {}\n",
            i,
            azimuth,
            distance,
            clip(&r.raw_span)
        ));
    }
    let partial = records.iter().filter(|r| !r.is_complete()).count();
    out.push_str(&format!("\n  {} record(s)", records.len()));
    if partial > 0 {
        out.push_str(&format!(", {partial} incomplete"));
    }
    out
}

pub fn print_report(
    report: &ComparisonReport,
    deed: &[MeasurementRecord],
    plan: &[MeasurementRecord],
    options: &CompareOptions,
    show_all: bool,
) {
    println!("=== Deed vs plan ===\n");
    println!(
        "  Records: {} in deed, {} in plan",
        deed.len(),
        plan.len()
    );
    println!(
        "  Tolerances: {} m, {}° ({} alignment)",
        options.tolerances.distance_m, options.tolerances.bearing_deg, options.alignment
    );

    if report.is_consistent() {
        println!("  Overall: CONSISTENT ({} matching leg(s))\n", report.matches.len());
    } else {
        println!(
            "  Overall: {} discrepancy(ies), {} matching leg(s)\n",
            report.error_count(),
            report.matches.len()
        );
    }

    let entries: Vec<&ComparisonEntry> = report
        .paired_entries()
        .into_iter()
        .filter(|e| show_all || e.status != MatchStatus::Match)
        .collect();

    if !entries.is_empty() {
        println!("  {}:", if show_all { "Pairs" } else { "Discrepancies" });
        for e in &entries {
            print_entry(e, deed, plan);
        }
        println!();
    }

    if !report.unmatched_deed.is_empty() {
        println!("  Deed records without a plan counterpart:");
        for &i in &report.unmatched_deed {
            println!("    deed[{i}]  {}", record_at(deed, i));
        }
        println!();
    }
    if !report.unmatched_plan.is_empty() {
        println!("  Plan records without a deed counterpart:");
        for &j in &report.unmatched_plan {
            println!("    plan[{j}]  {}", record_at(plan, j));
        }
        println!();
    }
}

fn print_entry(e: &ComparisonEntry, deed: &[MeasurementRecord], plan: &[MeasurementRecord]) {
    let plan_label = e
        .plano_index
        .map(|j| format!("plan[{j}]"))
        .unwrap_or_else(|| "-".into());
    let distance_diff = e
        .distance_diff
        .map(|d| format!("Δd {d:.2} m"))
        .unwrap_or_else(|| "Δd -".into());
    let bearing_diff = e
        .bearing_diff
        .map(|b| format!("Δθ {b:.6}°"))
        .unwrap_or_else(|| "Δθ -".into());

    println!(
        "    deed[{}] -> {}  {:<17}  {}  {}",
        e.escritura_index,
        plan_label,
        e.status.to_string(),
        distance_diff,
        bearing_diff
    );
    println!("      deed: {}", record_at(deed, e.escritura_index));
    if let Some(j) = e.plano_index {
        println!("      plan: {}", record_at(plan, j));
    }
}

fn record_at(records: &[MeasurementRecord], index: usize) -> String {
    match records.get(index) {
        Some(r) if r.raw_span.is_empty() => r.to_string(),
        Some(r) => format!("{r}  \"{}\"", clip(&r.raw_span)),
        None => "-".into(),
    }
}

fn clip(span: &str) -> String {
    if span.chars().count() <= SPAN_WIDTH {
        span.to_string()
    } else {
        let head: String = span.chars().take(SPAN_WIDTH - 3).collect();
        format!("{head}...")
    }
}
