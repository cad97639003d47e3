use rumbo_core::error::RumboError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), RumboError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
