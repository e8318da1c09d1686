use anyhow::Result;
use console::style;
use tracing::debug;

use crate::{
    commands::{Dispatch, invocation_from_args},
    configuration::load_configuration,
    dependencies::FileStore,
    logging::setup_logging,
};

mod args;
mod commands;
mod configuration;
mod dependencies;
mod formatting;
mod interaction;
mod logging;
mod models;

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let store = FileStore::from_env();
    debug!(path = %store.path().display(), "using configuration file");
    let configuration = load_configuration(&store).await;

    let Dispatch { invocation, format } =
        match invocation_from_args(std::env::args_os(), configuration.as_ref(), store) {
            Ok(dispatch) => dispatch,
            Err(error) => match error.downcast::<clap::Error>() {
                // Usage errors, help and version are printed by clap
                Ok(clap_error) => clap_error.exit(),
                Err(error) => {
                    eprintln!("{} {error:#}", style("Error:").red());
                    return Ok(());
                }
            },
        };

    // Failures are reported, the process always exits normally
    match invocation.execute(configuration, format).await {
        Ok(output) if output.is_empty() => {}
        Ok(output) => println!("{output}"),
        Err(failure) => println!("{}", style(failure).red()),
    }

    Ok(())
}
