//! Command to configure commuter.
//!
//! This is the first command a user runs, and the command that runs whenever the
//! stored configuration is missing or corrupt. It prompts for the API key and the
//! default location and replaces any stored configuration.

use std::fmt::Display;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::{
    commands::{
        CommandWithOutput,
        core::{CommandError, Validate},
    },
    configuration::Configuration,
    dependencies::ConfigurationStore,
    interaction::{InputPrompt, InputPromptOptions, Interaction},
};

const API_KEY_PROMPT: &str = "Enter Google Maps API Key:";
const API_KEY_HELP: &str = "developers.google.com/console";
const DEFAULT_LOCATION_PROMPT: &str = "Enter Your Default Location:";
const DEFAULT_LOCATION_HELP: &str = "ex. 123 Main St. Toronto, Canada";

pub struct Configure {
    interaction: Box<dyn InputPrompt + Send + Sync>,
    store: Box<dyn ConfigurationStore + Send + Sync>,
}

impl Configure {
    pub fn new(store: impl ConfigurationStore + Send + Sync + 'static) -> Self {
        Self {
            interaction: Box::new(Interaction::new()),
            store: Box::new(store),
        }
    }
}

impl Display for Configure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configure")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigureResult {
    pub default_location: String,
}

impl Display for ConfigureResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration saved")
    }
}

// Configure has no preconditions, it's how a missing or corrupt configuration gets fixed
#[async_trait]
impl Validate for Configure {
    type Validated = Self;

    async fn validate(
        self,
        _configuration: Option<Configuration>,
    ) -> Result<Self::Validated, CommandError> {
        Ok(self)
    }
}

#[async_trait]
impl CommandWithOutput for Configure {
    type Output = ConfigureResult;

    async fn execute(&mut self) -> Result<Self::Output> {
        let api_key = self
            .interaction
            .prompt_until_non_empty(
                InputPromptOptions::builder()
                    .message(API_KEY_PROMPT)
                    .help_message(API_KEY_HELP)
                    .build(),
            )
            .context("prompting for API key")?;

        let default_location = self
            .interaction
            .prompt_until_non_empty(
                InputPromptOptions::builder()
                    .message(DEFAULT_LOCATION_PROMPT)
                    .help_message(DEFAULT_LOCATION_HELP)
                    .build(),
            )
            .context("prompting for default location")?;

        // The previous configuration is replaced as a whole
        let configuration = Configuration::new(api_key, default_location.clone());
        debug!("saving new configuration");
        self.store
            .save(&configuration)
            .await
            .context("saving configuration")?;

        Ok(ConfigureResult { default_location })
    }
}
