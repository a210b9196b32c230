mod artifact;

use std::path::Path;
use std::sync::Arc;

pub use artifact::{Estimator, ModelArtifact, Node, Tree};

use crate::{
    entities::Prediction,
    error::{model_error, Error},
};

/// A pre-trained predictor, loaded once and shared read-only.
pub trait Model {
    fn name(&self) -> &str;

    fn kind(&self) -> &str;

    fn feature_count(&self) -> usize;

    /// Fails with a client error when `features` does not match
    /// `feature_count`.
    fn predict(&self, features: &[f64]) -> Result<Prediction, Error>;
}

pub type DynModel = Arc<dyn Model + Send + Sync>;

/// Reads and validates a model artifact from disk.
#[tracing::instrument]
pub async fn load(path: &Path) -> Result<ModelArtifact, Error> {
    let bytes = tokio::fs::read(path).await.map_err(|err| {
        tracing::error!("unable to read model artifact: {}", err);
        model_error(format!("unable to read {}: {}", path.display(), err))
    })?;

    let artifact = ModelArtifact::from_slice(&bytes)?;

    tracing::info!(
        "loaded model {} ({}, {} features)",
        artifact.name(),
        artifact.kind(),
        artifact.feature_count()
    );

    Ok(artifact)
}
