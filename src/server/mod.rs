mod extract;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::Extension,
    http::Request,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::{
    config::Config,
    engine::Engine,
    entities::FEATURE_COUNT,
    error::{model_error, server_error, Error},
    external::{Nominatim, OpenRouteService},
    model::{self, Model},
};
use crate::server::handlers::{distance, health, prediction};

pub use crate::api::DynAPI;
pub use extract::Payload;

pub fn router(api: DynAPI, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health::find))
        .route("/get_distance", post(distance::find))
        .route("/predict", post(prediction::predict))
        .route("/analyze", post(prediction::analyze))
        .layer(Extension(api))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    id = %Uuid::new_v4(),
                    method = %request.method(),
                    uri = %request.uri()
                )
            }),
        )
}

/// Loads the model and wires the adapters. Nothing is bound until every
/// step has succeeded.
#[tracing::instrument(name = "server::start", skip_all)]
pub async fn start(config: Config) -> Result<(), Error> {
    let model = model::load(&config.model_path).await?;

    if model.feature_count() != FEATURE_COUNT {
        return Err(model_error(format!(
            "model {} expects {} features, requests carry {}",
            model.name(),
            model.feature_count(),
            FEATURE_COUNT
        )));
    }

    let geocoder = Nominatim::new(&config.nominatim_base_url, &config.nominatim_user_agent)?;
    let routes = OpenRouteService::new(&config.ors_base_url, &config.ors_api_key)?;

    let engine = Engine::new(Arc::new(geocoder), Arc::new(routes), Arc::new(model));
    let app = router(Arc::new(engine), config.cors.layer()?);

    serve(app, config.bind_address).await
}

pub async fn serve(app: Router, addr: SocketAddr) -> Result<(), Error> {
    let server = axum::Server::try_bind(&addr).map_err(server_error)?;

    tracing::info!("listening on {}", addr);

    server
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(server_error)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("unable to listen for shutdown signal: {}", err);
        return;
    }

    tracing::info!("shutting down");
}
