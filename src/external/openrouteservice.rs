use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

use super::RouteProvider;
use crate::{
    entities::{Coordinates, DistanceResult},
    error::{upstream_error, Error},
};

const DRIVING_PROFILE: &str = "driving-car";

#[derive(Clone, Debug)]
pub struct OpenRouteService {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Meters. Omitted by the provider for zero-length routes.
    #[serde(default)]
    pub distance: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteSummary {
    #[serde(default)]
    pub summary: Summary,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Feature {
    pub properties: RouteSummary,
}

/// Either the JSON shape (`routes`) or the GeoJSON shape (`features`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub routes: Vec<RouteSummary>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl DirectionsResponse {
    pub fn distance_meters(&self) -> Option<f64> {
        let route = self
            .routes
            .first()
            .or_else(|| self.features.first().map(|feature| &feature.properties))?;

        let meters = route.summary.distance;

        (meters.is_finite() && meters >= 0.0).then(|| meters)
    }
}

impl OpenRouteService {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, Error> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').into(),
            api_key: api_key.into(),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<DirectionsResponse, Error> {
        let url = format!("{}/v2/directions/{}", self.base_url, DRIVING_PROFILE);

        let res = self
            .client
            .get(url)
            .header(AUTHORIZATION, &self.api_key)
            .query(&[("start", origin.lon_lat())])
            .query(&[("end", destination.lon_lat())])
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::warn!("routing provider responded with status {}", res.status());
            return Err(upstream_error());
        }

        let data: DirectionsResponse = res.json().await?;

        Ok(data)
    }
}

#[async_trait]
impl RouteProvider for OpenRouteService {
    #[tracing::instrument(skip(self))]
    async fn driving_distance(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Option<f64> {
        let data = match self.directions(origin, destination).await {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!("routing failed: {}", err);
                return None;
            }
        };

        match data.distance_meters() {
            Some(meters) => Some(DistanceResult::from_meters(meters).distance_km),
            None => {
                tracing::warn!("routing response carried no usable route");
                None
            }
        }
    }
}
