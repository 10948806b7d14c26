//! `noto search` handler

use super::{short_id, App, CommandResult};

/// Print every discipline, task and note matching `term`
pub fn run(app: &App, term: &str) -> CommandResult {
    let hits = app.search(term);
    if hits.is_empty() {
        println!("No results for '{term}'.");
        return Ok(());
    }
    for hit in hits {
        match hit.subtitle {
            Some(sub) => println!("{:<10} {}  {}  ({sub})", hit.kind.to_string(), short_id(&hit.id), hit.title),
            None => println!("{:<10} {}  {}", hit.kind.to_string(), short_id(&hit.id), hit.title),
        }
    }
    Ok(())
}
