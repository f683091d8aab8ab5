//! CLI command implementations.

mod ask;
mod chat;
mod config;
mod doctor;
mod search;
mod serve;

pub use ask::run_ask;
pub use chat::run_chat;
pub use config::run_config;
pub use doctor::run_doctor;
pub use search::run_search;
pub use serve::{router, run_serve, AppState};

use crate::cli::Output;
use crate::config::Settings;
use crate::conversation::RenderedTurn;
use crate::runtime::Runtime;

/// Check credentials and build the runtime behind a spinner.
async fn start_runtime(settings: Settings) -> anyhow::Result<Runtime> {
    let credentials = crate::cli::preflight::chat_credentials()?;

    let spinner = Output::spinner("Indexing movies...");
    let runtime = Runtime::bootstrap(settings, &credentials).await;
    spinner.finish_and_clear();

    match runtime {
        Ok(runtime) => Ok(runtime),
        Err(e) => {
            Output::error(&format!("Failed to start: {}", e));
            Err(e.into())
        }
    }
}

/// Print an answer followed by its movie cards.
fn print_turn(turn: &RenderedTurn) {
    println!("\n{} {}", console::style("Moviewhiz:").cyan().bold(), turn.answer());
    for movie in &turn.movies {
        Output::movie_card(movie);
    }
    println!();
}
