//! Line input shared by the overwrite prompt and the interactive session.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use pdfmerge::error::Result;

/// Reads answers and commands one line at a time.
pub struct Prompter<R> {
    lines: Lines<R>,
}

impl Prompter<BufReader<Stdin>> {
    /// Prompter reading from standard input.
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> Prompter<R> {
    /// Prompter over any buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Print `prompt` without a newline and read the next line.
    ///
    /// Returns `None` at end of input.
    pub async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        if !prompt.is_empty() {
            print!("{prompt}");
            io::stdout().flush().ok();
        }
        Ok(self.lines.next_line().await?)
    }

    /// Ask a yes/no question; anything but "y" or "yes" is a no.
    pub async fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(&format!("{question} [y/N]: ")).await?;
        Ok(answer.is_some_and(|answer| {
            let answer = answer.trim().to_lowercase();
            answer == "y" || answer == "yes"
        }))
    }
}
