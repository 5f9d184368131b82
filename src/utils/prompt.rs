use crate::utils::error::{ExportError, Result};
use std::collections::VecDeque;

/// Console input seam. Selection and resolution logic read through this trait
/// so they can be driven by scripted input in tests.
pub trait Prompt {
    /// Read one line of input. Empty input is allowed.
    fn line(&mut self, message: &str) -> Result<String>;

    /// Read one line without echoing it back (API tokens).
    fn secret(&mut self, message: &str) -> Result<String>;
}

#[derive(Debug, Default)]
pub struct ConsolePrompt;

fn dialoguer_err(e: dialoguer::Error) -> ExportError {
    match e {
        dialoguer::Error::IO(io) => ExportError::IoError(io),
    }
}

impl Prompt for ConsolePrompt {
    fn line(&mut self, message: &str) -> Result<String> {
        dialoguer::Input::<String>::new()
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
            .map_err(dialoguer_err)
    }

    fn secret(&mut self, message: &str) -> Result<String> {
        dialoguer::Password::new()
            .with_prompt(message)
            .interact()
            .map_err(dialoguer_err)
    }
}

/// Replays canned answers; used by unit and integration tests.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn line(&mut self, _message: &str) -> Result<String> {
        self.answers.pop_front().ok_or(ExportError::ConfigError {
            message: "no scripted input left".to_string(),
        })
    }

    fn secret(&mut self, message: &str) -> Result<String> {
        self.line(message)
    }
}
