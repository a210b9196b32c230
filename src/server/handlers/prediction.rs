use axum::extract::{Extension, Json};

use crate::entities::{AnalysisResult, PredictionInput, PredictionResult};
use crate::error::Error;
use crate::server::{DynAPI, Payload};

pub async fn predict(
    Extension(api): Extension<DynAPI>,
    Payload(params): Payload<PredictionInput>,
) -> Result<Json<PredictionResult>, Error> {
    let prediction = api.predict(params).await?;

    Ok(prediction.into())
}

pub async fn analyze(
    Extension(api): Extension<DynAPI>,
    Payload(params): Payload<PredictionInput>,
) -> Result<Json<AnalysisResult>, Error> {
    let analysis = api.analyze(params).await?;

    Ok(analysis.into())
}
