use axum::extract::{Extension, Json};

use crate::entities::{DistanceResult, LocationRequest};
use crate::error::Error;
use crate::server::{DynAPI, Payload};

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Payload(params): Payload<LocationRequest>,
) -> Result<Json<DistanceResult>, Error> {
    let distance = api.find_distance(params).await?;

    Ok(distance.into())
}
