//! Ask command implementation.

use super::{print_turn, start_runtime};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the ask command: one question in a fresh session.
pub async fn run_ask(question: &str, settings: Settings) -> Result<()> {
    let runtime = start_runtime(settings).await?;
    let mut session = runtime.session();

    let spinner = Output::spinner("Thinking...");
    let result = session.ask(question).await;
    spinner.finish_and_clear();

    match result {
        Ok(turn) => {
            print_turn(&turn);
            if turn.movies.is_empty() && !turn.recommendations.is_empty() {
                Output::warning("None of the recommended movies were found in the catalog.");
            }
        }
        Err(e) => {
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
