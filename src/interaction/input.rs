use anyhow::Result;
use inquire::{InquireError, Text};

use super::{InputPrompt, InputPromptOptions, InputPromptResult, Interaction};

impl InputPrompt for Interaction {
    fn input(&self, options: InputPromptOptions) -> Result<InputPromptResult> {
        let mut prompt = Text::new(&options.message);

        if let Some(help_message) = options.help_message.as_deref() {
            prompt = prompt.with_help_message(help_message);
        }

        match prompt.prompt() {
            Ok(value) => Ok(InputPromptResult::Input(value)),
            Err(e) => match e {
                InquireError::OperationCanceled => Ok(InputPromptResult::Canceled),
                InquireError::OperationInterrupted => Ok(InputPromptResult::Canceled),
                _ => Err(anyhow::anyhow!("error prompting for input: {}", e)),
            },
        }
    }
}
