use rumbo_core::error::RumboError;
use rumbo_core::tolerances::load_profile;
use rumbo_core::tolerances::schema::ToleranceProfile;
use std::path::Path;

pub fn show(file: Option<&Path>) -> Result<(), RumboError> {
    let profile = match file {
        Some(path) => load_profile(path)?,
        None => ToleranceProfile::default(),
    };

    println!(
        "{}\n",
        profile.name.as_deref().unwrap_or("Default tolerances")
    );
    if let Some(ref desc) = profile.description {
        println!("{desc}\n");
    }
    println!("  Distance:   {} m", profile.tolerances.distance_m);
    println!("  Bearing:    {}°", profile.tolerances.bearing_deg);
    println!("  Alignment:  {}", profile.alignment);
    println!();
    println!("A paired leg matches when neither difference exceeds its tolerance.");
    println!("The distance is checked first; a leg failing both is reported as a");
    println!("distance mismatch (positional alignment reports both).");
    Ok(())
}

pub fn schema() -> Result<(), RumboError> {
    print!(
        r#"JSON Tolerance Profile Schema
=============================

A profile sets how far a plan measurement may stray from the deed before
`rumbo compare` reports it. Command-line flags override profile values.

Top-level fields (all optional):
  name          (string)  Human-readable name of the profile
  description   (string)  What the profile is for
  tolerances    (object)  See below. Missing fields keep their defaults.
  alignment     (string)  How deed legs are paired with plan legs:
                            "greedy"      each deed leg takes the closest
                                          plan leg still unused (default)
                            "positional"  deed leg i pairs with plan leg i
                            "auto"        positional when both documents
                                          have the same number of legs,
                                          greedy otherwise

Tolerance fields (strings holding decimal numbers):
  distance_m    Metres. Default "0.5". Must not be negative.
  bearing_deg   Degrees. Default "0.05". Between "0" and "180".

Example:
{{
  "name": "Urban lots",
  "description": "Tighter tolerances for recent urban surveys",
  "tolerances": {{
    "distance_m": "0.10",
    "bearing_deg": "0.01"
  }},
  "alignment": "auto"
}}
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), RumboError> {
    let profile = load_profile(file)?;
    println!(
        "Valid profile: {} (distance {} m, bearing {}°, {} alignment)",
        profile.name.as_deref().unwrap_or("unnamed"),
        profile.tolerances.distance_m,
        profile.tolerances.bearing_deg,
        profile.alignment
    );
    Ok(())
}
