use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{
    AnalysisResult, DistanceResult, LocationRequest, PredictionInput, PredictionResult,
};
use crate::error::Error;

#[async_trait]
pub trait DistanceAPI {
    async fn find_distance(&self, request: LocationRequest) -> Result<DistanceResult, Error>;
}

#[async_trait]
pub trait PredictionAPI {
    async fn predict(&self, input: PredictionInput) -> Result<PredictionResult, Error>;
    async fn analyze(&self, input: PredictionInput) -> Result<AnalysisResult, Error>;
    fn model_name(&self) -> String;
}

pub trait API: DistanceAPI + PredictionAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
