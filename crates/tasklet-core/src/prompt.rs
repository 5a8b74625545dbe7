use std::io::{self, BufRead, Write};

use tasklet_shared::Prompter;
use tracing::warn;

/// Line-oriented stand-in for the browser's modal dialogs.
///
/// End of input cancels a prompt and declines a confirmation. An empty
/// answer to a text prompt keeps the offered default.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        let asked = write!(self.output, "{question} ").and_then(|()| self.output.flush());
        if let Err(error) = asked {
            warn!(%error, "failed writing prompt");
            return None;
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(error) => {
                warn!(%error, "failed reading answer");
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        self.ask(&format!("{message} [y/N]"))
            .is_some_and(|answer| {
                matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
            })
    }

    fn prompt_text(&mut self, message: &str, default: &str) -> Option<String> {
        let answer = self.ask(&format!("{message} [{default}]"))?;
        if answer.is_empty() {
            Some(default.to_string())
        } else {
            Some(answer)
        }
    }
}
