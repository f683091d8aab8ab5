//! CLI output formatting utilities.

use crate::catalog::MovieRecord;
use crate::conversation::{ChatTurn, Role};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print one transcript turn.
    pub fn turn(turn: &ChatTurn) {
        match turn.role() {
            Role::Human => println!("{} {}", style("You:").green().bold(), turn.content()),
            Role::Assistant => println!("{} {}", style("Moviewhiz:").cyan().bold(), turn.content()),
        }
    }

    /// Print a movie card: title, rating, overview, link, separator.
    pub fn movie_card(movie: &MovieRecord) {
        println!("\n{} {}", style(">>").green(), style(movie.display_title()).bold());
        println!("   {} {}", style("Rating:").dim(), movie.rating_label());
        if !movie.overview.is_empty() {
            println!("   {}", content_preview(&movie.overview, 300));
        }
        println!("   {} {}", style("Watch Now:").dim(), style(&movie.url).cyan());
        println!("{}", style("-".repeat(40)).dim());
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
        {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Truncate content with ellipsis, on a character boundary.
fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        let truncated: String = content.chars().take(max_chars).collect();
        format!("{}...", truncated.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_preview_short_text_unchanged() {
        assert_eq!(content_preview("A heist.\nIn LA.", 50), "A heist. In LA.");
    }

    #[test]
    fn test_content_preview_respects_char_boundaries() {
        let preview = content_preview("Amélie découvre", 6);
        assert_eq!(preview, "Amélie...");
    }
}
