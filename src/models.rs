use std::fmt::Display;

use serde::Serialize;

/// Mode of travel used when calculating a commute duration.
///
/// The declaration order is the order in which durations are calculated and printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Drive,
    Walk,
    Bike,
    Transit,
}

impl TravelMode {
    /// Name of the mode as understood by the Distance Matrix API.
    pub fn api_name(&self) -> &'static str {
        match self {
            Self::Drive => "driving",
            Self::Walk => "walking",
            Self::Bike => "bicycling",
            Self::Transit => "transit",
        }
    }
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Drive => write!(f, "Drive"),
            Self::Walk => write!(f, "Walk"),
            Self::Bike => write!(f, "Bike"),
            Self::Transit => write!(f, "Transit"),
        }
    }
}

/// Latitude/longitude pair of the current device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Formats as `<lat>,<lng>` without rounding, which the routing API accepts as an address.
impl Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Side of a commute a location belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    From,
    To,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::From => write!(f, "from"),
            Self::To => write!(f, "to"),
        }
    }
}
