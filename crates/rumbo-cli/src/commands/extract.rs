use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), rumbo_core::error::RumboError> {
    let text = std::fs::read_to_string(&input_file)?;
    let records = rumbo_core::extract_measurements(&text);

    let output_str = match output_format {
        "json" => serde_json::to_string_pretty(&records)?,
        _ => output::table::format_records(&records),
    };

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&records)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Extracted {} record(s), written to {}",
                records.len(),
                path.display()
            );
            let partial = records.iter().filter(|r| !r.is_complete()).count();
            if partial > 0 {
                eprintln!("  {partial} record(s) missing a bearing or a distance");
            }
        }
        None => {
            println!("{output_str}");
        }
    }

    Ok(())
}
