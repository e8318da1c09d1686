//! Google Maps integration.
//!
//! One client serves both collaborators of the commute command:
//! - [`DurationProvider`] backed by the Distance Matrix API
//! - [`Locator`] backed by the Geolocation API
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};
use url::Url;

use crate::models::{Coordinates, TravelMode};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DISTANCE_MATRIX_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";
const GEOLOCATION_URL: &str = "https://www.googleapis.com/geolocation/v1/geolocate";
const AVOID: &str = "tolls";

const STATUS_OK: &str = "OK";
const STATUS_NOT_FOUND: &str = "NOT_FOUND";

/// Google Maps errors.
#[derive(Debug, Error)]
pub enum MapsError {
    /// The provided API key was invalid.
    #[error("invalid API key: {reason}")]
    InvalidApiKey { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
    /// Failed to build the request URL.
    #[error("failed to build request URL")]
    Url(#[from] url::ParseError),
    /// HTTP request failed. The request URL, which carries the API key, is stripped.
    #[error("request failed")]
    Request(#[source] reqwest::Error),
    /// API returned an error response.
    #[error("API error ({status}): {message}")]
    Api { status: String, message: String },
    /// Either the origin or the destination could not be found.
    #[error("failed to find one of the provided locations")]
    LocationNotFound,
    /// The API answered without an error, but without a duration either.
    #[error("duration unavailable")]
    Unavailable,
    /// Failed to parse response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

// Dependency to calculate the travel duration between two locations
#[async_trait]
pub trait DurationProvider {
    async fn duration(&self, from: &str, to: &str, mode: TravelMode)
    -> Result<Duration, MapsError>;
}

// Dependency to determine the location of the current device
#[async_trait]
pub trait Locator {
    async fn current_location(&self) -> Result<Coordinates, MapsError>;
}

/// Google Maps API client.
pub struct GoogleMaps {
    http: reqwest::Client,
    api_key: String,
}

impl fmt::Debug for GoogleMaps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleMaps")
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl GoogleMaps {
    /// Creates a new client with the given API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or whitespace-only, or if
    /// the HTTP client fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, MapsError> {
        let api_key = api_key.into();

        if api_key.trim().is_empty() {
            return Err(MapsError::InvalidApiKey {
                reason: "API key cannot be empty",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(MapsError::ClientBuild)?;

        Ok(Self { http, api_key })
    }

    fn distance_matrix_url(
        &self,
        from: &str,
        to: &str,
        mode: TravelMode,
    ) -> Result<Url, MapsError> {
        Ok(Url::parse_with_params(
            DISTANCE_MATRIX_URL,
            &[
                ("origins", from),
                ("destinations", to),
                ("mode", mode.api_name()),
                ("avoid", AVOID),
                ("key", self.api_key.as_str()),
            ],
        )?)
    }

    fn geolocation_url(&self) -> Result<Url, MapsError> {
        Ok(Url::parse_with_params(
            GEOLOCATION_URL,
            &[("key", self.api_key.as_str())],
        )?)
    }
}

#[async_trait]
impl DurationProvider for GoogleMaps {
    async fn duration(
        &self,
        from: &str,
        to: &str,
        mode: TravelMode,
    ) -> Result<Duration, MapsError> {
        debug!(from, to, %mode, "requesting travel duration");

        let response = self
            .http
            .get(self.distance_matrix_url(from, to, mode)?)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(request_error)?;
        trace!(%status, body = %body, "distance matrix response");

        if !status.is_success() {
            return Err(MapsError::Api {
                status: status.to_string(),
                message: body,
            });
        }

        let payload: DistanceMatrixResponse = serde_json::from_str(&body)
            .map_err(|err| MapsError::InvalidResponse(err.to_string()))?;
        duration_from_response(payload)
    }
}

#[async_trait]
impl Locator for GoogleMaps {
    async fn current_location(&self) -> Result<Coordinates, MapsError> {
        debug!("requesting current location");

        let response = self
            .http
            .post(self.geolocation_url()?)
            .json(&GeolocationRequest { consider_ip: true })
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(request_error)?;
        trace!(%status, body = %body, "geolocation response");

        let payload: GeolocationResponse = serde_json::from_str(&body).map_err(|err| {
            if status.is_success() {
                MapsError::InvalidResponse(err.to_string())
            } else {
                MapsError::Api {
                    status: status.to_string(),
                    message: body.clone(),
                }
            }
        })?;
        coordinates_from_response(payload)
    }
}

fn request_error(error: reqwest::Error) -> MapsError {
    MapsError::Request(error.without_url())
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<DistanceMatrixRow>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixRow {
    #[serde(default)]
    elements: Vec<DistanceMatrixElement>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixElement {
    status: String,
    duration: Option<DistanceMatrixValue>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixValue {
    /// Duration in seconds.
    value: u64,
}

/// Pick the duration out of a distance matrix response.
///
/// The first element that is either found or not found decides the outcome.
fn duration_from_response(response: DistanceMatrixResponse) -> Result<Duration, MapsError> {
    if response.status != STATUS_OK {
        return Err(MapsError::Api {
            message: response
                .error_message
                .unwrap_or_else(|| "no error message provided".to_string()),
            status: response.status,
        });
    }

    for element in response.rows.into_iter().flat_map(|row| row.elements) {
        match element.status.as_str() {
            STATUS_NOT_FOUND => return Err(MapsError::LocationNotFound),
            STATUS_OK => {
                return element
                    .duration
                    .map(|duration| Duration::from_secs(duration.value))
                    .ok_or(MapsError::Unavailable);
            }
            _ => {}
        }
    }

    Err(MapsError::Unavailable)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeolocationRequest {
    consider_ip: bool,
}

#[derive(Debug, Deserialize)]
struct GeolocationResponse {
    location: Option<LatLng>,
    error: Option<GeolocationApiError>,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct GeolocationApiError {
    code: u16,
    message: String,
}

fn coordinates_from_response(response: GeolocationResponse) -> Result<Coordinates, MapsError> {
    if let Some(error) = response.error {
        return Err(MapsError::Api {
            status: error.code.to_string(),
            message: error.message,
        });
    }

    response
        .location
        .map(|location| Coordinates {
            latitude: location.lat,
            longitude: location.lng,
        })
        .ok_or_else(|| MapsError::InvalidResponse("missing location".to_string()))
}
