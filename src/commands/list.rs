use std::{collections::BTreeMap, fmt::Display};

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::{
    commands::{
        CommandWithOutput,
        core::{CommandError, Validate},
    },
    configuration::{Configuration, DEFAULT_LOCATION_ALIAS},
};

pub struct List;

impl Display for List {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "List")
    }
}

#[async_trait]
impl Validate for List {
    type Validated = ListLocations;

    async fn validate(
        self,
        configuration: Option<Configuration>,
    ) -> Result<Self::Validated, CommandError> {
        let configuration = configuration.ok_or(CommandError::NotConfigured)?;

        Ok(ListLocations {
            locations: configuration.locations,
        })
    }
}

pub struct ListLocations {
    locations: BTreeMap<String, String>,
}

impl Display for ListLocations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "List")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedLocation {
    pub name: String,
    pub location: String,
}

/// Named locations, the default location first and the others sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ListResult(pub Vec<NamedLocation>);

/// One line per named location, names are right aligned on the longest name.
impl Display for ListResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self
            .0
            .iter()
            .map(|named| named.name.chars().count())
            .max()
            .unwrap_or_default();

        for (index, named) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }

            write!(f, "{:>width$}: {}", named.name, named.location)?;
        }

        Ok(())
    }
}

#[async_trait]
impl CommandWithOutput for ListLocations {
    type Output = ListResult;

    async fn execute(&mut self) -> Result<Self::Output> {
        let mut locations: Vec<NamedLocation> = self
            .locations
            .iter()
            .map(|(name, location)| NamedLocation {
                name: name.clone(),
                location: location.clone(),
            })
            .collect();

        // BTreeMap is already sorted by name, only the default location has to move to the front
        locations.sort_by_key(|named| named.name != DEFAULT_LOCATION_ALIAS);

        Ok(ListResult(locations))
    }
}
