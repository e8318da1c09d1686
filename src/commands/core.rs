//! This module contains the core traits for commands.
//!
//! Every command goes through two steps:
//! - [`Validate`] checks the command against the configuration and produces a validated command
//! - [`CommandWithOutput`] executes the validated command and returns its output
//!
//! A command that fails validation is never executed.
//! [`run`] drives both steps and turns the output, or the failure, into the text shown to the user.

use std::fmt::Display;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::{
    commands::location::LocationError,
    configuration::Configuration,
    formatting::{Format, Formattable},
};

/// Reasons for a command to be rejected before it runs.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("at least one commute method must be specified")]
    NoTravelMethod,
    #[error("missing --name parameter")]
    MissingName,
    #[error("missing --location parameter")]
    MissingValue,
    #[error("commuter is not configured yet")]
    NotConfigured,
    #[error(transparent)]
    Location(#[from] LocationError),
}

/// Trait for commands that need to be checked before they can be executed.
#[async_trait]
pub trait Validate {
    type Validated: CommandWithOutput;

    /// Validate the command and return the command that is ready to be executed.
    ///
    /// The configuration is `None` when commuter has not been configured yet.
    async fn validate(
        self,
        configuration: Option<Configuration>,
    ) -> Result<Self::Validated, CommandError>;
}

/// Trait for commands that return an output.
///
/// The output of a command is the result of the work.
#[async_trait]
pub trait CommandWithOutput {
    type Output;

    /// Execute the command and return the output.
    async fn execute(&mut self) -> Result<Self::Output>;
}

/// A command that did not complete.
#[derive(Debug, Error)]
pub enum Failure {
    /// The command was rejected by validation and never executed.
    #[error("Invalid command: {command}\nError: {error:#}")]
    Invalid {
        command: String,
        error: anyhow::Error,
    },
    /// The command failed while executing.
    #[error("Command failed: {command}\nError: {error:#}")]
    Failed {
        command: String,
        error: anyhow::Error,
    },
}

/// Validate and execute a command, returning its formatted output.
///
/// Invalid commands are described as given, failed commands as validated.
pub async fn run<C, O>(
    command: C,
    configuration: Option<Configuration>,
    format: Format,
) -> Result<String, Failure>
where
    C: Validate + Display + Send,
    C::Validated: CommandWithOutput<Output = O> + Display + Send,
    O: Formattable,
{
    // Describe the command before validation consumes it
    let description = command.to_string();

    let mut validated = command
        .validate(configuration)
        .await
        .map_err(|error| Failure::Invalid {
            command: description,
            error: error.into(),
        })?;

    // Run failures describe the validated command, e.g. with resolved addresses
    let description = validated.to_string();
    let failed = |error| Failure::Failed {
        command: description.clone(),
        error,
    };

    let output = validated.execute().await.map_err(failed)?;
    output.format(format).map_err(failed)
}
