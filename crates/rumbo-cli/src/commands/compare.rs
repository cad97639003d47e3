use rumbo_core::compare::CompareOptions;
use rumbo_core::error::RumboError;
use rumbo_core::model::MeasurementRecord;
use rumbo_core::segments::{segments_to_records, LineSegment, SegmentScale};
use rumbo_core::tolerances::schema::Alignment;
use rumbo_core::tolerances::{load_profile, validate_tolerances};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::output;

pub struct CompareArgs {
    pub deed_file: PathBuf,
    pub plan_file: PathBuf,
    pub config: Option<PathBuf>,
    pub distance_tol: Option<String>,
    pub bearing_tol: Option<String>,
    pub alignment: Option<String>,
    /// Metres per pixel and north offset when the plan is a segment list.
    pub segment_scale: Option<(f64, f64)>,
    pub output_format: String,
    pub show_all: bool,
}

/// A document as given on the command line.
enum Input {
    Text(String),
    Records(Vec<MeasurementRecord>),
}

impl Input {
    fn into_records(self) -> Vec<MeasurementRecord> {
        match self {
            Input::Text(text) => rumbo_core::extract_measurements(&text),
            Input::Records(records) => records,
        }
    }
}

pub fn run(args: CompareArgs) -> Result<(), RumboError> {
    let options = resolve_options(&args)?;
    tracing::debug!(?options, "comparison options");

    let deed = read_input(&args.deed_file)?;
    let plan = match args.segment_scale {
        Some((metres_per_pixel, north_offset_deg)) => {
            let scale = SegmentScale::new(metres_per_pixel, north_offset_deg)?;
            let segments: Vec<LineSegment> =
                serde_json::from_slice(&std::fs::read(&args.plan_file)?)?;
            Input::Records(segments_to_records(&segments, &scale)?)
        }
        None => read_input(&args.plan_file)?,
    };

    match (deed, plan) {
        (Input::Text(deed_text), Input::Text(plan_text)) => {
            let bundle = rumbo_core::compare_texts(&deed_text, &plan_text, &options);
            match args.output_format.as_str() {
                "json" => output::json::print(&bundle)?,
                _ => output::table::print_report(
                    &bundle.report,
                    &bundle.parsed_escritura,
                    &bundle.parsed_plano,
                    &options,
                    args.show_all,
                ),
            }
        }
        (deed, plan) => {
            let deed = deed.into_records();
            let plan = plan.into_records();
            let report = rumbo_core::compare_sequences(&deed, &plan, &options);
            match args.output_format.as_str() {
                "json" => output::json::print(&report)?,
                _ => output::table::print_report(&report, &deed, &plan, &options, args.show_all),
            }
        }
    }

    Ok(())
}

/// Profile (or defaults), then command-line overrides, then validation.
fn resolve_options(args: &CompareArgs) -> Result<CompareOptions, RumboError> {
    let mut options = match &args.config {
        Some(path) => load_profile(path)?.options(),
        None => CompareOptions::default(),
    };

    if let Some(raw) = &args.distance_tol {
        options.tolerances.distance_m = parse_tolerance("distance", raw)?;
    }
    if let Some(raw) = &args.bearing_tol {
        options.tolerances.bearing_deg = parse_tolerance("bearing", raw)?;
    }
    if let Some(raw) = &args.alignment {
        options.alignment = Alignment::from_str_loose(raw).ok_or_else(|| {
            RumboError::ToleranceInvalid(format!(
                "unknown alignment '{raw}', expected greedy, positional or auto"
            ))
        })?;
    }

    validate_tolerances(&options.tolerances)?;
    Ok(options)
}

fn parse_tolerance(what: &str, raw: &str) -> Result<Decimal, RumboError> {
    Decimal::from_str(raw.trim()).map_err(|e| {
        RumboError::ToleranceInvalid(format!("{what} tolerance '{raw}' is not a number: {e}"))
    })
}

/// `.json` files hold pre-parsed records; anything else is read as text.
fn read_input(path: &Path) -> Result<Input, RumboError> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        let json_bytes = std::fs::read(path)?;
        let records: Vec<MeasurementRecord> = serde_json::from_slice(&json_bytes)?;
        Ok(Input::Records(records))
    } else {
        Ok(Input::Text(std::fs::read_to_string(path)?))
    }
}
