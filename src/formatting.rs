//! This module contains the formatting logic for the application.
//!
//! The main entry point is the [`Formattable`] trait which provides a method to format an object as text or json.
//! It also contains [`humanize_duration`] which turns a travel duration into a sentence.
use std::{fmt::Display, time::Duration};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

/// Format of the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Trait for types that can be formatted as text or JSON.
///
/// The main use of this trait is to format the output of commands.
/// Types implementing both [`Display`] and [`Serialize`] automatically get a default implementation.
pub trait Formattable {
    /// Format the output of the object as text or json.
    fn format(&self, format: Format) -> Result<String>;
}

impl<T> Formattable for T
where
    T: Display + Serialize,
{
    fn format(&self, format: Format) -> Result<String> {
        Ok(match format {
            Format::Text => self.to_string(),
            Format::Json => serde_json::to_string(self).context("serializing to json")?,
        })
    }
}

/// Format a duration as hours and minutes, e.g. `2 Hours 1 Minute`.
///
/// The hour segment is left out when the duration is under an hour.
/// The minute segment is always present, `0 Minutes` included.
/// Seconds are truncated, never rounded.
pub fn humanize_duration(duration: Duration) -> String {
    let total_minutes = duration.as_secs() / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes - hours * 60;

    let minutes_segment = format!("{} {}", minutes, pluralize("Minute", minutes));
    if hours > 0 {
        format!("{} {} {}", hours, pluralize("Hour", hours), minutes_segment)
    } else {
        minutes_segment
    }
}

fn pluralize(unit: &str, count: u64) -> String {
    if count == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}
