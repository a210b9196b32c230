use super::Engine;

use async_trait::async_trait;

use crate::{
    api::PredictionAPI,
    entities::{AnalysisResult, PredictionInput, PredictionResult},
    error::{feature_count_error, Error},
};

#[async_trait]
impl PredictionAPI for Engine {
    #[tracing::instrument(skip_all)]
    async fn predict(&self, input: PredictionInput) -> Result<PredictionResult, Error> {
        let features = input.to_features();
        let prediction = self.model.predict(&features)?;

        tracing::info!("model {} predicted {:?}", self.model.name(), prediction);

        Ok(PredictionResult { prediction })
    }

    #[tracing::instrument(skip_all)]
    async fn analyze(&self, input: PredictionInput) -> Result<AnalysisResult, Error> {
        let features = input.to_features();

        if features.len() != self.model.feature_count() {
            return Err(feature_count_error(
                self.model.feature_count(),
                features.len(),
            ));
        }

        Ok(AnalysisResult {
            message: format!(
                "received {} features for model {} ({})",
                features.len(),
                self.model.name(),
                self.model.kind()
            ),
        })
    }

    fn model_name(&self) -> String {
        self.model.name().into()
    }
}
