//! Root parsers for the CLI.
//!
//! Running the binary without a command calculates a commute, the flags of
//! [`Commute`](super::Commute) are accepted at the root level.
//! `add` and `list` have their own parser, selected from the first argument.
use clap::{Args, Parser};

use crate::formatting::Format;

use super::{Add, Commute, List};

const COMMANDS_HELP: &str = "Commands:
  add   Add a named location, replacing the existing one with the same name
  list  List all named locations";

/// Calculate commute times between named locations and addresses
#[derive(Parser, Debug)]
#[command(name = "commuter", version, about, long_about = None)]
#[command(after_help = COMMANDS_HELP)]
pub struct Cli {
    #[command(flatten)]
    pub global_args: GlobalArgs,

    #[command(flatten)]
    pub commute: Commute,
}

/// Add a named location, replacing the existing one with the same name
#[derive(Parser, Debug)]
#[command(name = "add", bin_name = "commuter add")]
pub struct AddCli {
    #[command(flatten)]
    pub global_args: GlobalArgs,

    #[command(flatten)]
    pub add: Add,
}

/// List all named locations
#[derive(Parser, Debug)]
#[command(name = "list", bin_name = "commuter list")]
pub struct ListCli {
    #[command(flatten)]
    pub global_args: GlobalArgs,

    #[command(flatten)]
    pub list: List,
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Output format.
    #[arg(long = "output", short = 'o')]
    pub format: Option<Format>,
}
