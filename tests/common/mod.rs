#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Extension, Json, Query},
    http::{
        header::{AUTHORIZATION, USER_AGENT},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};

use fare_service::config::CorsConfig;
use fare_service::engine::Engine;
use fare_service::entities::FEATURE_COUNT;
use fare_service::external::{Nominatim, OpenRouteService};
use fare_service::model::{Estimator, ModelArtifact};
use fare_service::server::router;

pub const API_KEY: &str = "test-key";
pub const ALLOWED_ORIGIN: &str = "https://localhost:3000";

/// Binds `app` on an ephemeral port and returns its base url.
pub async fn spawn(app: Router) -> String {
    let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
        .serve(app.into_make_service());
    let addr = server.local_addr();

    tokio::spawn(server);

    format!("http://{}", addr)
}

/// Geocoding and routing providers on one router. Routing answers with
/// `routing_status` whenever it is not 200.
pub fn providers(routing_status: StatusCode) -> Router {
    Router::new()
        .route("/search", get(search))
        .route("/v2/directions/driving-car", get(directions))
        .layer(Extension(routing_status))
}

async fn search(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("format").map(String::as_str) != Some("json") || !headers.contains_key(USER_AGENT)
    {
        return StatusCode::BAD_REQUEST.into_response();
    }

    match params.get("q").map(String::as_str) {
        Some("Boston, MA") => Json(json!([
            { "lat": "41.0", "lon": "-70.0", "importance": 0.6, "display_name": "Boston, Lincolnshire" },
            { "lat": "42.36", "lon": "-71.06", "importance": 0.8, "display_name": "Boston, Massachusetts" }
        ]))
        .into_response(),
        Some("Unstable") => (StatusCode::SERVICE_UNAVAILABLE, "geocoder down").into_response(),
        Some("Garbled") => "<html>maintenance</html>".into_response(),
        _ => Json(json!([])).into_response(),
    }
}

async fn directions(
    Extension(status): Extension<StatusCode>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if status != StatusCode::OK {
        return (status, "upstream secret: quota exhausted for key test-key").into_response();
    }

    let key = headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok());
    if key != Some(API_KEY) {
        return (StatusCode::FORBIDDEN, "invalid key").into_response();
    }

    let start = params.get("start").map(String::as_str);
    let end = params.get("end").map(String::as_str);

    let meters = match (start, end) {
        (Some("-74.006,40.7128"), Some("-71.06,42.36")) => 346000.0,
        (Some(_), Some(_)) => 1500.0,
        _ => return StatusCode::BAD_REQUEST.into_response(),
    };

    Json(json!({
        "routes": [{ "summary": { "distance": meters, "duration": 12000.0 } }]
    }))
    .into_response()
}

pub fn summing_model() -> ModelArtifact {
    ModelArtifact::new(
        "sum",
        Estimator::Linear {
            coefficients: vec![1.0; FEATURE_COUNT],
            intercept: 0.0,
        },
    )
    .unwrap()
}

/// The full service wired to fake providers; returns its base url.
pub async fn service(routing_status: StatusCode) -> String {
    let providers = spawn(providers(routing_status)).await;

    let geocoder = Nominatim::new(&providers, "fare-service-tests").unwrap();
    let routes = OpenRouteService::new(&providers, API_KEY).unwrap();
    let engine = Engine::new(
        Arc::new(geocoder),
        Arc::new(routes),
        Arc::new(summing_model()),
    );

    let cors = CorsConfig {
        allowed_origins: vec![ALLOWED_ORIGIN.into()],
        allow_credentials: true,
    }
    .layer()
    .unwrap();

    spawn(router(Arc::new(engine), cors)).await
}

pub fn prediction_payload() -> Value {
    json!({
        "City": 2,
        "Day_of_Week": 5,
        "Latitude": 19.07,
        "Longitude": 72.87,
        "Ride_Distance_KM": 12.0,
        "Ride_Type": 1,
        "Weather": 1,
        "Event": 0,
        "Payment_Type": 2,
        "Available_Drivers": 8,
        "User_Booking_Count": 3,
        "Traffic_Density": 0.7,
        "Previous_Surge": 1.1,
        "Fare_Acceptance": 0.9,
        "Demand_Level": 1.4,
        "Surge_Multiplier": 1.3,
        "Final_Fare": 240.0,
        "Hour_of_Day": 9,
        "Is_Weekend": 0,
        "Real_Time_Demand": 1.2,
        "Driver_Performance_Score": 4.6,
        "Smart_Timeout": 25.0,
        "AI_Demand_Prediction": 1.1,
        "Driver_XP": 3.0,
        "Ride_Priority": 1,
        "Fare_Protection": 0,
        "Year": 2025,
        "Month": 2,
        "Day": 21
    })
}
