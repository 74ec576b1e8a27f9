//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::error::CliError;

const RETRY_HINT: &str = "Please select Yes/y or No/n";

/// Asks the operator whether a destructive action may go ahead.
pub trait Confirmer {
    async fn confirm(&mut self, message: &str) -> Result<bool, CliError>;
}

/// Prompts on the controlling terminal, auto-approving if `--yes` was passed.
pub struct TerminalConfirmer {
    yes: bool,
    cancel: CancellationToken,
}

impl TerminalConfirmer {
    pub fn new(yes: bool, cancel: CancellationToken) -> Self {
        Self { yes, cancel }
    }
}

impl Confirmer for TerminalConfirmer {
    async fn confirm(&mut self, message: &str) -> Result<bool, CliError> {
        if self.yes {
            return Ok(true);
        }
        if !io::stdin().is_terminal() {
            return Err(CliError::NonInteractiveRequiresYes {
                action: message.to_owned(),
            });
        }

        let message = message.to_owned();
        let prompt = tokio::task::spawn_blocking(move || prompt_yes_no(&message));

        tokio::select! {
            () = self.cancel.cancelled() => Err(CliError::Interrupted),
            joined = prompt => joined.map_err(|e| CliError::Io(io::Error::other(e)))?,
        }
    }
}

/// Source of answer lines for the yes/no prompt.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Called after an answer that is neither yes nor no.
    fn reject(&mut self, hint: &str);
}

/// Reads answers from the terminal with `dialoguer`.
struct TerminalReader;

impl LineReader for TerminalReader {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| match e {
                dialoguer::Error::IO(io) => io,
            })
    }

    fn reject(&mut self, hint: &str) {
        warn!("{hint}");
    }
}

fn prompt_yes_no(message: &str) -> Result<bool, CliError> {
    ask_yes_no(&mut TerminalReader, message)
}

/// Ask `message` until the answer parses as yes or no.
pub fn ask_yes_no<R: LineReader>(reader: &mut R, message: &str) -> Result<bool, CliError> {
    let prompt = format!("{message} (Yes/Y or No/N)");
    loop {
        let line = reader.read_line(&prompt).map_err(|e| {
            if e.kind() == io::ErrorKind::Interrupted {
                CliError::Interrupted
            } else {
                CliError::Io(e)
            }
        })?;
        if let Some(answer) = parse_answer(&line) {
            return Ok(answer);
        }
        reader.reject(RETRY_HINT);
    }
}

/// `y`/`yes` → true, `n`/`no` → false, any case, surrounding whitespace
/// ignored. Anything else is `None`.
pub fn parse_answer(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::VecDeque;

    use super::*;

    #[test]
    fn accepts_yes_and_no_in_any_case() {
        for input in ["y", "Y", "yes", "YES", " Yes \n"] {
            assert_eq!(parse_answer(input), Some(true), "{input:?}");
        }
        for input in ["n", "N", "no", "No", "\tNO "] {
            assert_eq!(parse_answer(input), Some(false), "{input:?}");
        }
    }

    #[test]
    fn rejects_everything_else() {
        for input in ["", "ye", "yess", "nope", "0", "1", "true"] {
            assert_eq!(parse_answer(input), None, "{input:?}");
        }
    }

    /// Replays canned lines and records every hint it is shown.
    struct ScriptedReader {
        lines: VecDeque<io::Result<String>>,
        prompts: Vec<String>,
        hints: Vec<String>,
    }

    impl ScriptedReader {
        fn new(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|l| Ok((*l).to_owned())).collect(),
                prompts: Vec::new(),
                hints: Vec::new(),
            }
        }
    }

    impl LineReader for ScriptedReader {
        fn read_line(&mut self, prompt: &str) -> io::Result<String> {
            self.prompts.push(prompt.to_owned());
            self.lines
                .pop_front()
                .unwrap_or_else(|| Err(io::ErrorKind::UnexpectedEof.into()))
        }

        fn reject(&mut self, hint: &str) {
            self.hints.push(hint.to_owned());
        }
    }

    #[test]
    fn asks_again_until_an_answer_parses() {
        let mut reader = ScriptedReader::new(&["maybe", "", "N"]);

        let answer = ask_yes_no(&mut reader, "Do you want to continue?").unwrap();

        assert!(!answer);
        assert_eq!(reader.prompts.len(), 3);
        assert_eq!(reader.prompts[0], "Do you want to continue? (Yes/Y or No/N)");
        assert_eq!(reader.hints, [RETRY_HINT, RETRY_HINT]);
    }

    #[test]
    fn first_valid_answer_wins() {
        let mut reader = ScriptedReader::new(&[" yes ", "n"]);
        assert!(ask_yes_no(&mut reader, "Continue?").unwrap());
        assert_eq!(reader.prompts.len(), 1);
        assert!(reader.hints.is_empty());
    }

    #[test]
    fn interrupted_read_stops_asking() {
        let mut reader = ScriptedReader::new(&["what"]);
        reader.lines.push_back(Err(io::ErrorKind::Interrupted.into()));

        let err = ask_yes_no(&mut reader, "Continue?").unwrap_err();

        assert!(matches!(err, CliError::Interrupted), "{err:?}");
        assert_eq!(reader.hints.len(), 1);
    }

    #[tokio::test]
    async fn yes_flag_skips_the_prompt() {
        let mut confirmer = TerminalConfirmer::new(true, CancellationToken::new());
        assert!(confirmer.confirm("Do you want to continue?").await.unwrap());
    }
}
