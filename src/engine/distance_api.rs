use super::Engine;

use async_trait::async_trait;

use crate::{
    api::DistanceAPI,
    entities::{DistanceResult, LocationRequest},
    error::{distance_fetch_error, invalid_destination_error, invalid_input_error, Error},
};

#[async_trait]
impl DistanceAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_distance(&self, request: LocationRequest) -> Result<DistanceResult, Error> {
        if request.destination.trim().is_empty() {
            return Err(invalid_input_error("destination must not be empty"));
        }

        let destination = self
            .geocoder
            .geocode(&request.destination)
            .await
            .ok_or_else(invalid_destination_error)?;

        let distance_km = self
            .routes
            .driving_distance(request.source(), destination)
            .await
            .ok_or_else(distance_fetch_error)?;

        tracing::info!("driving distance is {} km", distance_km);

        Ok(DistanceResult { distance_km })
    }
}
