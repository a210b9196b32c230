mod distance_api;
mod prediction_api;

use crate::{
    api::API,
    external::{DynGeocoder, DynRouteProvider},
    model::DynModel,
};

pub struct Engine {
    geocoder: DynGeocoder,
    routes: DynRouteProvider,
    model: DynModel,
}

impl Engine {
    pub fn new(geocoder: DynGeocoder, routes: DynRouteProvider, model: DynModel) -> Self {
        Self {
            geocoder,
            routes,
            model,
        }
    }
}

impl API for Engine {}
