//! CLI command handlers for `noto`.
//!
//! Each command group is implemented in its own submodule. Handlers return
//! errors to `main`, which prints them and sets the exit code.

pub mod averages;
pub mod config;
pub mod discipline;
pub mod export;
pub mod note;
pub mod profile;
pub mod schedule;
pub mod search;
pub mod task;

use noto::core::models::Discipline;
use noto::core::organizer::Organizer;
use noto::core::store::JsonStore;
use std::error::Error;

/// Organizer backed by the JSON data directory
pub type App = Organizer<JsonStore>;

/// Result type shared by command handlers
pub type CommandResult = Result<(), Box<dyn Error>>;

/// Number of id characters shown in listings
const SHORT_ID_LEN: usize = 8;

/// Leading characters of an id, enough to type it back
pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

/// Find an item by exact id or unique id prefix
///
/// # Errors
/// Returns an error when nothing matches or the prefix is ambiguous
pub fn resolve<'a, T>(
    items: &'a [T],
    query: &str,
    kind: &str,
    id_of: impl Fn(&T) -> &str,
) -> Result<&'a T, String> {
    if let Some(exact) = items.iter().find(|item| id_of(item) == query) {
        return Ok(exact);
    }
    let mut matches = items
        .iter()
        .filter(|item| !query.is_empty() && id_of(item).starts_with(query));
    match (matches.next(), matches.next()) {
        (Some(only), None) => Ok(only),
        (None, _) => Err(format!("No {kind} matches '{query}'")),
        (Some(_), Some(_)) => Err(format!(
            "'{query}' matches more than one {kind}; use a longer id"
        )),
    }
}

/// Find a discipline by id, id prefix or case-insensitive name
///
/// # Errors
/// Returns an error when nothing matches or the query is ambiguous
pub fn resolve_discipline<'a>(
    disciplines: &'a [Discipline],
    query: &str,
) -> Result<&'a Discipline, String> {
    let wanted = query.trim().to_lowercase();
    let by_name: Vec<&Discipline> = disciplines
        .iter()
        .filter(|d| d.name.to_lowercase() == wanted)
        .collect();
    if let [only] = by_name.as_slice() {
        return Ok(only);
    }
    resolve(disciplines, query, "discipline", |d| d.id.as_str())
}

/// Name of a discipline, or `—` when it no longer exists
pub fn discipline_name<'a>(disciplines: &'a [Discipline], id: &str) -> &'a str {
    disciplines
        .iter()
        .find(|d| d.id == id)
        .map_or("—", |d| d.name.as_str())
}
