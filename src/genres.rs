//! Film genres are kept as an ordered list in memory and as a JSON array string in the
//! `film.genres` column.

use crate::error::AppResult;

pub fn encode(genres: &[String]) -> AppResult<String> {
    Ok(serde_json::to_string(genres)?)
}

/// A missing column decodes to an empty list.
pub fn decode(stored: Option<&str>) -> AppResult<Vec<String>> {
    match stored {
        Some(raw) => Ok(serde_json::from_str(raw)?),
        None => Ok(Vec::new()),
    }
}
