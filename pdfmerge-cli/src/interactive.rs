//! Line-driven session mode.
//!
//! Each command maps onto one session action. Errors are reported and the
//! loop continues; only unreadable input ends it.

use std::path::PathBuf;
use std::str::FromStr;

use tokio::io::AsyncBufRead;
use tracing::debug;

use pdfmerge::backend::PdfBackend;
use pdfmerge::error::{MergeError, Result};
use pdfmerge::io::{PdfWriter, SourceReader};
use pdfmerge::output::{self, OutputFormatter};
use pdfmerge::session::{Session, Slot};

use crate::actions;
use crate::prompt::Prompter;

const PROMPT: &str = "pdfmerge> ";

const HELP: &str = "\
Commands:
  first <path>       Load the first PDF
  second <path>      Load the second PDF
  merge              Merge the first PDF followed by the second
  download [name]    Save the merged PDF (default: merged-document.pdf)
  clear              Remove both PDFs and the merged output
  status             Show what is loaded
  help               Show this help
  quit               Leave the session";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load a file into a slot.
    Load(Slot, PathBuf),
    /// Merge both slots.
    Merge,
    /// Save the output under a requested name (may be blank).
    Download(String),
    /// Reset the session.
    Clear,
    /// Show the session status.
    Status,
    /// Show the command list.
    Help,
    /// End the session.
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word.to_lowercase().as_str() {
            "first" | "second" => {
                let slot = if word.eq_ignore_ascii_case("first") {
                    Slot::First
                } else {
                    Slot::Second
                };
                if rest.is_empty() {
                    return Err(format!("Usage: {slot} <path>"));
                }
                Ok(Self::Load(slot, PathBuf::from(rest)))
            }
            "merge" => Ok(Self::Merge),
            "download" | "save" => Ok(Self::Download(rest.to_string())),
            "clear" | "reset" => Ok(Self::Clear),
            "status" => Ok(Self::Status),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("Unknown command: {other} (type 'help' for a list)")),
        }
    }
}

/// Run commands from `prompter` until `quit` or end of input.
///
/// # Errors
///
/// Returns an error only when input cannot be read.
pub async fn run<B, R>(
    session: &mut Session<B>,
    reader: &SourceReader,
    writer: &mut PdfWriter,
    formatter: &OutputFormatter,
    prompter: &mut Prompter<R>,
) -> Result<()>
where
    B: PdfBackend,
    R: AsyncBufRead + Unpin,
{
    if formatter.should_print() {
        formatter.info("Type 'help' for a list of commands.");
    }

    loop {
        let prompt = if formatter.should_print() { PROMPT } else { "" };
        let Some(line) = prompter.ask(prompt).await? else {
            debug!("end of input");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(message) => {
                formatter.error(&message);
                continue;
            }
        };
        debug!(?command, "command");

        let result = match command {
            Command::Load(slot, path) => {
                actions::load_slot(session, reader, slot, &path, formatter).await
            }
            Command::Merge => actions::merge(session, formatter),
            Command::Download(name) => {
                actions::download(session, writer, &name, formatter, prompter)
                    .await
                    .map(|_| ())
            }
            Command::Clear => {
                session.reset();
                formatter.success("All files cleared.");
                Ok(())
            }
            Command::Status => {
                output::display_status(formatter, &session.status());
                Ok(())
            }
            Command::Help => {
                if formatter.should_print() {
                    println!("{HELP}");
                }
                Ok(())
            }
            Command::Quit => break,
        };

        match result {
            Ok(()) => {}
            Err(MergeError::Io { source }) => return Err(MergeError::Io { source }),
            Err(err) => output::display_error(formatter, &err),
        }
    }

    Ok(())
}
