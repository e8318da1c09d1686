//! Command to add a named location.
//!
//! Adding a name that already exists replaces its location.

use std::fmt::Display;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::{
    args,
    commands::{
        CommandWithOutput,
        core::{CommandError, Validate},
    },
    configuration::Configuration,
    dependencies::ConfigurationStore,
};

pub struct Add {
    pub(super) name: String,
    pub(super) location: String,

    store: Box<dyn ConfigurationStore + Send + Sync>,
}

impl Add {
    pub fn from_args(
        args: args::Add,
        store: impl ConfigurationStore + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: args.name,
            location: args.location,
            store: Box::new(store),
        }
    }
}

impl Display for Add {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Adding named location '{}' with value '{}'",
            self.name, self.location
        )
    }
}

#[async_trait]
impl Validate for Add {
    type Validated = AddToConfiguration;

    async fn validate(
        self,
        configuration: Option<Configuration>,
    ) -> Result<Self::Validated, CommandError> {
        if self.name.is_empty() {
            return Err(CommandError::MissingName);
        }
        if self.location.is_empty() {
            return Err(CommandError::MissingValue);
        }

        Ok(AddToConfiguration {
            name: self.name,
            location: self.location,
            configuration: configuration.ok_or(CommandError::NotConfigured)?,
            store: self.store,
        })
    }
}

/// Validated add command, holding the configuration it updates.
pub struct AddToConfiguration {
    name: String,
    location: String,
    configuration: Configuration,

    store: Box<dyn ConfigurationStore + Send + Sync>,
}

impl Display for AddToConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Adding named location '{}' with value '{}'",
            self.name, self.location
        )
    }
}

/// Result of the add command.
///
/// Adding a location is silent in text mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddResult {
    pub name: String,
    pub location: String,
}

impl Display for AddResult {
    fn fmt(&self, _f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}

#[async_trait]
impl CommandWithOutput for AddToConfiguration {
    type Output = AddResult;

    async fn execute(&mut self) -> Result<Self::Output> {
        if let Some(previous) = self
            .configuration
            .locations
            .insert(self.name.clone(), self.location.clone())
        {
            debug!(name = %self.name, %previous, "replacing named location");
        }

        self.store
            .save(&self.configuration)
            .await
            .context("saving configuration")?;

        Ok(AddResult {
            name: self.name.clone(),
            location: self.location.clone(),
        })
    }
}
