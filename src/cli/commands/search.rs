//! Search command implementation.

use crate::catalog::{MovieCatalog, TmdbCatalog};
use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the search command against the catalog, bypassing the chat.
pub async fn run_search(query: &str, limit: usize, settings: Settings) -> Result<()> {
    let api_key = preflight::search_key()?;
    let catalog = TmdbCatalog::new(&api_key, &settings.catalog)?;

    let spinner = Output::spinner("Searching...");
    let results = catalog.search(query).await;
    spinner.finish_and_clear();

    match results {
        Ok(movies) => {
            if movies.is_empty() {
                Output::warning("No movies found matching your query.");
            } else {
                let shown = movies.len().min(limit);
                Output::success(&format!("Found {} movies, showing {}", movies.len(), shown));
                for movie in movies.iter().take(limit) {
                    Output::movie_card(movie);
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
