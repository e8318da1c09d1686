//! This module contains business logic for the commands for the application.
//!
//! The main entry point is the [`invocation_from_args`] function which converts the raw arguments
//! into exactly one [`Invocation`], which is then executed with [`Invocation::execute`].
use std::ffi::OsString;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use crate::{
    args::{AddCli, Cli, ListCli},
    commands::{add::Add, commute::Commute, configure::Configure, list::List},
    configuration::Configuration,
    dependencies::FileStore,
    formatting::Format,
};
pub use self::core::{CommandWithOutput, Failure};
use self::core::run;

pub mod add;
pub mod commute;
pub mod configure;
mod core;
pub mod list;
mod location;

/// The command selected for one run of the application.
pub enum Invocation {
    Configure(Configure),
    Commute(Commute),
    AddAlias(Add),
    ListAliases(List),
}

impl Invocation {
    /// Validate and execute the command, returning its formatted output.
    pub async fn execute(
        self,
        configuration: Option<Configuration>,
        format: Format,
    ) -> Result<String, Failure> {
        match self {
            Invocation::Configure(command) => run(command, configuration, format).await,
            Invocation::Commute(command) => run(command, configuration, format).await,
            Invocation::AddAlias(command) => run(command, configuration, format).await,
            Invocation::ListAliases(command) => run(command, configuration, format).await,
        }
    }
}

/// Selected command together with the requested output format.
pub struct Dispatch {
    pub invocation: Invocation,
    pub format: Format,
}

impl Dispatch {
    fn text(invocation: Invocation) -> Self {
        Self {
            invocation,
            format: Format::default(),
        }
    }
}

/// Convert the raw arguments, program name included, into a command.
///
/// Commuter has to be configured before anything else, so [`Configure`] is selected
/// whenever there's no configuration or no arguments, whatever the arguments are.
/// Otherwise the first argument selects the command: `add`, `list`, or a commute for anything else.
///
/// Errors are clap errors (including `--help` and `--version`) or a failure to create
/// the Google Maps client.
pub fn invocation_from_args<I, T>(
    args: I,
    configuration: Option<&Configuration>,
    store: FileStore,
) -> Result<Dispatch>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    let Some(configuration) = configuration.filter(|_| args.len() > 1) else {
        debug!("dispatching to configure");
        return Ok(Dispatch::text(Invocation::Configure(Configure::new(store))));
    };

    match args[1].to_str() {
        Some("add") => {
            let cli = AddCli::try_parse_from(&args[1..])?;

            Ok(Dispatch {
                invocation: Invocation::AddAlias(Add::from_args(cli.add, store)),
                format: cli.global_args.format.unwrap_or_default(),
            })
        }
        Some("list") => match ListCli::try_parse_from(&args[1..]) {
            Ok(cli) => Ok(Dispatch {
                invocation: Invocation::ListAliases(List),
                format: cli.global_args.format.unwrap_or_default(),
            }),
            // Whatever follows `list` is ignored
            Err(error) if error.use_stderr() => {
                debug!(%error, "ignoring arguments of list");
                Ok(Dispatch::text(Invocation::ListAliases(List)))
            }
            Err(error) => Err(error.into()),
        },
        _ => {
            let cli = Cli::try_parse_from(&args)?;
            let format = cli.global_args.format.unwrap_or_default();
            let commute = Commute::try_from_args(cli.commute, &configuration.api_key, format)
                .context("creating commute command")?;

            Ok(Dispatch {
                invocation: Invocation::Commute(commute),
                format,
            })
        }
    }
}
