use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Longitude-first pair, the order routing providers expect.
    pub fn lon_lat(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocationRequest {
    pub source_lat: f64,
    pub source_lon: f64,
    pub destination: String,
}

impl LocationRequest {
    pub fn source(&self) -> Coordinates {
        Coordinates::new(self.source_lat, self.source_lon)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    #[serde(rename = "distance")]
    pub distance_km: f64,
}

impl DistanceResult {
    pub fn from_meters(meters: f64) -> Self {
        Self {
            distance_km: meters / 1000.0,
        }
    }
}
