//! The persisted configuration record.
//!
//! A record holds the Google Maps API key and the named locations (aliases) of the user.
//! It is either absent (first run, or the stored file is unreadable) or fully populated.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dependencies::ConfigurationStore;

/// Name of the alias used for `--from` and `--to` when they are not provided.
pub const DEFAULT_LOCATION_ALIAS: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(rename = "APIKey")]
    pub api_key: String,
    #[serde(rename = "Locations", default)]
    pub locations: BTreeMap<String, String>,
}

impl Configuration {
    /// Create a brand-new record with only the default location set.
    pub fn new(api_key: impl Into<String>, default_location: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            locations: BTreeMap::from([(
                DEFAULT_LOCATION_ALIAS.to_string(),
                default_location.into(),
            )]),
        }
    }

    /// Whether the record satisfies the populated-record invariant.
    pub fn is_complete(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Load the configuration from the store.
///
/// Any failure, including a record without an API key, is treated as "not configured yet".
pub async fn load_configuration(
    store: &(dyn ConfigurationStore + Send + Sync),
) -> Option<Configuration> {
    match store.load().await {
        Ok(configuration) if configuration.is_complete() => Some(configuration),
        Ok(_) => {
            debug!("stored configuration has no API key, discarding it");
            None
        }
        Err(error) => {
            debug!(error = %error, "no usable configuration found");
            None
        }
    }
}
