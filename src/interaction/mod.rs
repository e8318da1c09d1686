use anyhow::{Result, anyhow};
use typed_builder::TypedBuilder;

mod input;
mod output;
mod spinner;

#[derive(Debug, Default, Clone)]
pub struct Interaction;

impl Interaction {
    pub fn new() -> Self {
        Default::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct InputPromptOptions {
    #[builder(setter(into))]
    pub message: String,
    #[builder(default, setter(strip_option, into))]
    pub help_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPromptResult {
    Input(String),
    Canceled,
}

pub trait InputPrompt {
    fn input(&self, options: InputPromptOptions) -> Result<InputPromptResult>;

    /// Prompts the user until a non-blank line is entered and returns it trimmed.
    ///
    /// Blank answers are re-prompted without an error message.
    /// Returns an error if the user cancels the prompt.
    fn prompt_until_non_empty(&self, options: InputPromptOptions) -> Result<String> {
        loop {
            match self.input(options.clone())? {
                InputPromptResult::Input(value) if value.trim().is_empty() => continue,
                InputPromptResult::Input(value) => return Ok(value.trim().to_string()),
                InputPromptResult::Canceled => return Err(anyhow!("user canceled the prompt")),
            }
        }
    }
}

pub struct SpinnerHandle {
    stop_spinner: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl SpinnerHandle {
    pub fn new(stop_spinner: Box<dyn FnOnce() + Send + Sync>) -> Self {
        Self {
            stop_spinner: Some(stop_spinner),
        }
    }
}

impl Drop for SpinnerHandle {
    fn drop(&mut self) {
        if let Some(stop_spinner) = self.stop_spinner.take() {
            stop_spinner();
        }
    }
}

pub trait SpinnerInteraction {
    fn start_spinner(&self, message: String) -> Result<SpinnerHandle>;
}

/// Output written while a command is still running.
pub trait PrintInteraction {
    fn print_line(&self, line: &str);
}
