mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rumbo",
    version,
    about = "Compare bearings and distances between a property deed and its survey plan"
)]
struct Cli {
    /// Log extraction and matching decisions to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract bearing/distance records from a text document
    Extract {
        /// Path to a text file (deed or plan)
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the extracted records to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Compare a deed against a plan (text files or pre-parsed JSON)
    Compare {
        /// Deed: text file or JSON record list
        deed_file: PathBuf,

        /// Plan: text file, JSON record list, or JSON segment list with --segments
        plan_file: PathBuf,

        /// JSON tolerance profile
        #[arg(short, long = "config", value_name = "FILE")]
        config: Option<PathBuf>,

        /// Distance tolerance in metres (overrides the profile)
        #[arg(long, value_name = "METRES")]
        distance_tol: Option<String>,

        /// Bearing tolerance in degrees (overrides the profile)
        #[arg(long, value_name = "DEGREES")]
        bearing_tol: Option<String>,

        /// Pairing strategy: greedy, positional or auto (overrides the profile)
        #[arg(long, value_name = "MODE")]
        alignment: Option<String>,

        /// Read the plan as a JSON list of detected line segments
        #[arg(long, requires = "metres_per_pixel")]
        segments: bool,

        /// Ground metres per image pixel for --segments
        #[arg(long, value_name = "K")]
        metres_per_pixel: Option<f64>,

        /// Clockwise rotation of the drawing's north arrow for --segments
        #[arg(long, value_name = "DEGREES", default_value_t = 0.0, allow_hyphen_values = true)]
        north_offset: f64,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show matching pairs too, not just discrepancies
        #[arg(long)]
        show_all: bool,
    },
    /// Inspect and validate tolerance profiles
    Tolerances {
        #[command(subcommand)]
        action: TolerancesAction,
    },
}

#[derive(Subcommand)]
enum TolerancesAction {
    /// Print the default tolerances, or those of a profile file
    Show {
        /// Path to JSON profile
        file: Option<PathBuf>,
    },
    /// Print the JSON profile schema with field descriptions and example
    Schema,
    /// Validate a profile file
    Validate {
        /// Path to JSON profile
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Extract {
            input_file,
            output,
            out,
        } => commands::extract::run(input_file, &output, out),
        Commands::Compare {
            deed_file,
            plan_file,
            config,
            distance_tol,
            bearing_tol,
            alignment,
            segments,
            metres_per_pixel,
            north_offset,
            output,
            show_all,
        } => commands::compare::run(commands::compare::CompareArgs {
            deed_file,
            plan_file,
            config,
            distance_tol,
            bearing_tol,
            alignment,
            segment_scale: if segments {
                metres_per_pixel.map(|k| (k, north_offset))
            } else {
                None
            },
            output_format: output,
            show_all,
        }),
        Commands::Tolerances { action } => match action {
            TolerancesAction::Show { file } => commands::tolerances::show(file.as_deref()),
            TolerancesAction::Schema => commands::tolerances::schema(),
            TolerancesAction::Validate { file } => commands::tolerances::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
