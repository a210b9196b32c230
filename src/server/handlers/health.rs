use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    status: String,
    model: String,
}

pub async fn find(Extension(api): Extension<DynAPI>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        model: api.model_name(),
    })
}
