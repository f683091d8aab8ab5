//! Interactive chat command.

use super::{print_turn, start_runtime};
use crate::cli::Output;
use crate::config::Settings;
use crate::conversation::ConversationOrchestrator;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// What the REPL should do with one line of input.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand<'a> {
    Skip,
    Exit,
    Clear,
    History,
    Ask(&'a str),
}

fn parse_line(line: &str) -> ReplCommand<'_> {
    let input = line.trim();
    if input.is_empty() {
        ReplCommand::Skip
    } else if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
        ReplCommand::Exit
    } else if input.eq_ignore_ascii_case("clear") {
        ReplCommand::Clear
    } else if input.eq_ignore_ascii_case("history") {
        ReplCommand::History
    } else {
        ReplCommand::Ask(input)
    }
}

/// Run the interactive chat command.
pub async fn run_chat(settings: Settings) -> Result<()> {
    let runtime = start_runtime(settings).await?;
    let mut session = runtime.session();

    println!("\n{}", style("Moviewhiz").bold().cyan());
    println!(
        "{}\n",
        style("Ask about movies, or 'exit' to quit. Use 'clear' to reset, 'history' to replay.")
            .dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            break;
        }

        match parse_line(&line) {
            ReplCommand::Skip => continue,
            ReplCommand::Exit => {
                Output::info("Goodbye!");
                break;
            }
            ReplCommand::Clear => {
                session.reset();
                Output::info("Conversation history cleared.");
            }
            ReplCommand::History => print_history(&session),
            ReplCommand::Ask(question) => {
                let spinner = Output::spinner("Thinking...");
                let result = session.ask(question).await;
                spinner.finish_and_clear();

                match result {
                    Ok(turn) => print_turn(&turn),
                    Err(e) => Output::error(&format!("No answer could be produced: {}", e)),
                }
            }
        }
    }

    Ok(())
}

fn print_history(session: &ConversationOrchestrator) {
    if session.transcript().is_empty() {
        Output::info("No conversation yet.");
        return;
    }
    println!();
    for turn in session.transcript().turns() {
        Output::turn(turn);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_commands() {
        assert_eq!(parse_line("  \n"), ReplCommand::Skip);
        assert_eq!(parse_line("QUIT\n"), ReplCommand::Exit);
        assert_eq!(parse_line("exit"), ReplCommand::Exit);
        assert_eq!(parse_line("Clear"), ReplCommand::Clear);
        assert_eq!(parse_line("history"), ReplCommand::History);
        assert_eq!(
            parse_line("  any good heist films?\n"),
            ReplCommand::Ask("any good heist films?")
        );
    }
}
