use std::{fs, path::PathBuf};

use crate::model::{DayPlan, HandicapLevel};

/// # Errors
///
/// Will return `Err` if any `;`-separated file is not readable
pub fn check_readable_file(file: &str) -> Result<String, String> {
    for file in file.split(';') {
        let file = file.trim();
        if file.is_empty() {
            continue;
        }
        let path = PathBuf::from(file);
        if !path.is_file() || fs::metadata(&path).is_err() {
            return Err(format!("The sql startup script '{file}' is not readable."));
        }
    }
    Ok(file.to_string())
}

/// # Errors
///
/// Will return `Err` if the file is not readable or is not a day plan in json
pub fn check_readable_day_plan(file: &str) -> Result<DayPlan, String> {
    let path = PathBuf::from(file);
    if !path.is_file() {
        return Err(format!("The json file '{file}' is not readable."));
    }
    let contents =
        fs::read_to_string(&path).map_err(|e| format!("The json file '{file}' is not readable: {e}"))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("The json file '{file}' is not a day plan: {e}"))
}

/// # Errors
///
/// Will return `Err` if the value is not a known handicap level
pub fn check_handicap_level(value: &str) -> Result<HandicapLevel, String> {
    HandicapLevel::parse(value).ok_or_else(|| {
        format!(
            "'{value}' is not a handicap level (beginner, novice, intermediate, advanced, expert, pro)."
        )
    })
}

/// Api keys may be given inline or as the path of a mounted secret.
#[must_use]
pub fn resolve_secret(value: &str) -> String {
    let secrets_locations = ["/secrets/supabase_key", "/run/secrets/supabase_key"];
    if secrets_locations.contains(&value) {
        match fs::read_to_string(value) {
            Ok(contents) => return contents.trim().to_string(),
            Err(e) => tracing::warn!("failed to read secret file '{value}': {e}"),
        }
    }
    value.to_string()
}
