mod location;
mod prediction;

pub use location::{Coordinates, DistanceResult, LocationRequest};
pub use prediction::{
    AnalysisResult, Prediction, PredictionInput, PredictionResult, FEATURE_COUNT, FEATURE_NAMES,
};

#[cfg(test)]
pub(crate) use prediction::tests::sample_payload;
