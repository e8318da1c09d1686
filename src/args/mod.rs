//! CLI argument parsing layer.
//!
//! This module provides the CLI interface using clap derive macros.
//! It handles parsing command-line arguments and converting them into structured data types.
//!
//! The business logic layer is [`crate::commands`], which picks the parser from the first argument
//! and receives these parsed arguments.

use clap::Args;

use crate::configuration::DEFAULT_LOCATION_ALIAS;

mod cli;

pub use cli::{AddCli, Cli, ListCli};

/// Add a named location, replacing the existing one with the same name.
#[derive(Args, Debug, PartialEq, Eq)]
pub struct Add {
    /// The name of the location you'd like to add [ex. 'work'].
    #[arg(long, default_value = "")]
    pub name: String,

    /// The location to be added [ex. '123 Main St. Toronto, Canada'].
    #[arg(long, default_value = "")]
    pub location: String,

    // Flags are read up to the first positional argument
    #[arg(hide = true, trailing_var_arg = true)]
    pub ignored: Vec<String>,
}

/// List all named locations.
#[derive(Args, Debug, PartialEq, Eq)]
pub struct List {
    #[arg(hide = true, trailing_var_arg = true)]
    pub ignored: Vec<String>,
}

// Flags of the default command, calculating the duration of a commute.
// Durations are calculated for every selected travel method, driving is used when none is selected.
#[derive(Args, Debug, PartialEq, Eq)]
pub struct Commute {
    /// The starting point of your commute, either a named location [ex. 'work'] or an address [ex. '123 Main St. Toronto, Canada'].
    #[arg(long, default_value = DEFAULT_LOCATION_ALIAS)]
    pub from: String,

    /// Sets your current location as the starting point of your commute.
    ///
    /// This uses Geolocation to determine your latitude/longitude based on IP address. Accuracy may vary.
    #[arg(long)]
    pub from_current: bool,

    /// The destination of your commute, either a named location [ex. 'work'] or an address [ex. '123 Main St. Toronto, Canada'].
    #[arg(long, default_value = DEFAULT_LOCATION_ALIAS)]
    pub to: String,

    /// Sets your current location as the destination of your commute.
    ///
    /// This uses Geolocation to determine your latitude/longitude based on IP address. Accuracy may vary.
    #[arg(long)]
    pub to_current: bool,

    /// Adds 'driving' as a travel method [default].
    #[arg(long)]
    pub drive: bool,

    /// Adds 'walking' as a travel method.
    #[arg(long)]
    pub walk: bool,

    /// Adds 'biking' as a travel method.
    #[arg(long)]
    pub bike: bool,

    /// Adds 'transit' as a travel method.
    #[arg(long)]
    pub transit: bool,

    // Flags are read up to the first positional argument
    #[arg(hide = true, trailing_var_arg = true)]
    pub ignored: Vec<String>,
}
