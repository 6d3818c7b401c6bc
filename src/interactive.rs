//! Line-driven interactive mode.
//!
//! Plain lines replace the prompt; slash commands trigger actions. Stdin is
//! read on its own thread so the prompt stays editable while a request is in
//! flight.

use std::io::BufRead;

use tokio::sync::mpsc;

use crate::render::render;
use crate::session::Session;
use crate::view::{Event, Notice};

const HELP: &str = "\
Type a prompt and press enter to set it.
  /generate, /g      generate images for the current prompt
  /download N, /d N  save tile N as generated-image-N.png
  /show, /s          show the current view
  /help, /h          show this help
  /quit, /q          exit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the prompt with this text.
    Prompt(String),
    /// Trigger generation.
    Generate,
    /// Download the tile at this index.
    Download(usize),
    /// Re-render the view.
    Show,
    /// Print usage.
    Help,
    /// Leave interactive mode.
    Quit,
    /// A slash command that could not be understood.
    Invalid(String),
}

/// Parse one line of input.
#[must_use]
pub fn parse_command(line: &str) -> Command {
    let Some(rest) = line.trim().strip_prefix('/') else {
        return Command::Prompt(line.to_string());
    };
    let (name, arg) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    match name {
        "generate" | "g" => Command::Generate,
        "download" | "d" => match arg.trim().parse() {
            Ok(index) => Command::Download(index),
            Err(_) => Command::Invalid(format!("usage: /download N (got '{}')", arg.trim())),
        },
        "show" | "s" => Command::Show,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command '/{other}', try /help")),
    }
}

enum Input {
    Line(Option<String>),
    Resolved(Option<Event>),
}

/// Run the interactive loop until `/quit` or end of input.
///
/// At end of input an in-flight request is awaited before returning; after
/// `/quit` it is abandoned.
pub async fn run(session: &mut Session) {
    let mut lines = spawn_stdin_reader();
    print!("{}", render(session.view()));
    println!("\nType /help for commands.");

    loop {
        let input = tokio::select! {
            line = lines.recv() => Input::Line(line),
            event = session.next_event() => Input::Resolved(event),
        };

        match input {
            Input::Resolved(Some(event)) => {
                report(&session.dispatch(event));
                print!("{}", render(session.view()));
            }
            Input::Resolved(None) => break,
            Input::Line(None) => {
                report(&session.settle().await);
                print!("{}", render(session.view()));
                break;
            }
            Input::Line(Some(line)) => match parse_command(&line) {
                Command::Prompt(text) => report(&session.dispatch(Event::PromptEdited(text))),
                Command::Generate => {
                    report(&session.dispatch(Event::GenerateRequested));
                    print!("{}", render(session.view()));
                }
                Command::Download(index) => {
                    report(&session.dispatch(Event::DownloadRequested(index)));
                }
                Command::Show => print!("{}", render(session.view())),
                Command::Help => println!("{HELP}"),
                Command::Quit => {
                    if session.view().is_busy() {
                        tracing::info!("quitting with a generation request in flight");
                    }
                    break;
                }
                Command::Invalid(message) => eprintln!("{message}"),
            },
        }
    }
}

/// Print notices to stderr.
pub fn report(notices: &[Notice]) {
    for notice in notices {
        eprintln!("{notice}");
    }
}

fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_sets_prompt() {
        assert_eq!(parse_command("a cat in space"), Command::Prompt("a cat in space".into()));
        assert_eq!(parse_command(""), Command::Prompt(String::new()));
    }

    #[test]
    fn generate_aliases() {
        assert_eq!(parse_command("/generate"), Command::Generate);
        assert_eq!(parse_command("  /g  "), Command::Generate);
    }

    #[test]
    fn download_with_index() {
        assert_eq!(parse_command("/download 2"), Command::Download(2));
        assert_eq!(parse_command("/d   0"), Command::Download(0));
    }

    #[test]
    fn download_without_index_is_invalid() {
        assert!(matches!(parse_command("/download"), Command::Invalid(_)));
        assert!(matches!(parse_command("/d two"), Command::Invalid(_)));
        assert!(matches!(parse_command("/d -1"), Command::Invalid(_)));
    }

    #[test]
    fn other_commands() {
        assert_eq!(parse_command("/show"), Command::Show);
        assert_eq!(parse_command("/help"), Command::Help);
        assert_eq!(parse_command("/q"), Command::Quit);
        assert_eq!(parse_command("/exit"), Command::Quit);
    }

    #[test]
    fn unknown_command() {
        match parse_command("/frobnicate now") {
            Command::Invalid(message) => assert!(message.contains("/frobnicate")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }
}
