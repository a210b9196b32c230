pub mod nominatim;
pub mod openrouteservice;

use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::Coordinates;

pub use nominatim::Nominatim;
pub use openrouteservice::OpenRouteService;

/// Resolves a free-text address to its best matching coordinate.
///
/// Implementations absorb every provider failure and report it as `None`.
#[async_trait]
pub trait Geocoder {
    async fn geocode(&self, address: &str) -> Option<Coordinates>;
}

/// Driving distance in kilometers between two coordinates, `None` on any
/// provider failure.
#[async_trait]
pub trait RouteProvider {
    async fn driving_distance(&self, origin: Coordinates, destination: Coordinates)
        -> Option<f64>;
}

pub type DynGeocoder = Arc<dyn Geocoder + Send + Sync>;
pub type DynRouteProvider = Arc<dyn RouteProvider + Send + Sync>;
