//! Resolution of the `from` and `to` inputs of a commute into addresses.
//!
//! A location is given either as a named location, a literal address or as a request to use
//! the current location of the device. Named locations are looked up in the configuration,
//! anything that isn't a known name is passed through as an address.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::{
    configuration::DEFAULT_LOCATION_ALIAS,
    dependencies::{Locator, MapsError},
    models::Side,
};

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("cannot use --{side} and --{side}-current arguments")]
    ConflictingInput { side: Side },
    #[error("missing --{side} or --{side}-current parameter")]
    Missing { side: Side },
    #[error(transparent)]
    Geolocation(#[from] MapsError),
}

pub struct LocationResolver<'a, L: ?Sized> {
    locations: &'a BTreeMap<String, String>,
    locator: &'a L,
}

impl<'a, L> LocationResolver<'a, L>
where
    L: Locator + Sync + ?Sized,
{
    pub fn new(locations: &'a BTreeMap<String, String>, locator: &'a L) -> Self {
        Self { locations, locator }
    }

    /// Resolve one side of a commute into the address sent to the routing API.
    ///
    /// `use_current` can only be combined with an empty value or the default alias,
    /// which is what an unset `--from`/`--to` defaults to.
    pub async fn resolve(
        &self,
        side: Side,
        value: &str,
        use_current: bool,
    ) -> Result<String, LocationError> {
        if use_current && !value.is_empty() && value != DEFAULT_LOCATION_ALIAS {
            return Err(LocationError::ConflictingInput { side });
        }

        let address = if use_current {
            let coordinates = self.locator.current_location().await?;
            debug!(%side, %coordinates, "using current location");
            coordinates.to_string()
        } else {
            self.alias(side, value)
        };

        if address.is_empty() {
            return Err(LocationError::Missing { side });
        }

        Ok(address)
    }

    fn alias(&self, side: Side, value: &str) -> String {
        match self.locations.get(value) {
            Some(address) => {
                debug!(%side, alias = value, address = %address, "resolved named location");
                address.clone()
            }
            None => value.to_string(),
        }
    }
}
