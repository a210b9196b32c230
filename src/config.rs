use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};

use crate::error::{config_error, Error};

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";
const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_ORS_BASE_URL: &str = "https://api.openrouteservice.org";
const DEFAULT_MODEL_PATH: &str = "model.json";
const DEFAULT_CORS_ALLOWED_ORIGINS: &str = "https://localhost:3000";

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub nominatim_base_url: String,
    pub nominatim_user_agent: String,
    pub ors_base_url: String,
    pub ors_api_key: String,
    pub model_path: PathBuf,
    pub cors: CorsConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl Config {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        let bind_address = var("BIND_ADDRESS", DEFAULT_BIND_ADDRESS)
            .parse::<SocketAddr>()
            .map_err(|err| config_error(format!("BIND_ADDRESS: {}", err)))?;

        let ors_api_key = lookup("ORS_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| config_error("ORS_API_KEY must be set"))?;

        let allow_credentials = match var("CORS_ALLOW_CREDENTIALS", "true").trim() {
            "true" | "1" => true,
            "false" | "0" => false,
            other => {
                return Err(config_error(format!(
                    "CORS_ALLOW_CREDENTIALS: expected true or false, got {}",
                    other
                )))
            }
        };

        let allowed_origins = var("CORS_ALLOWED_ORIGINS", DEFAULT_CORS_ALLOWED_ORIGINS)
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let cors = CorsConfig {
            allowed_origins,
            allow_credentials,
        };
        cors.validate()?;

        Ok(Self {
            bind_address,
            nominatim_base_url: var("NOMINATIM_BASE_URL", DEFAULT_NOMINATIM_BASE_URL),
            nominatim_user_agent: var(
                "NOMINATIM_USER_AGENT",
                concat!("fare-service/", env!("CARGO_PKG_VERSION")),
            ),
            ors_base_url: var("ORS_BASE_URL", DEFAULT_ORS_BASE_URL),
            ors_api_key,
            model_path: var("MODEL_PATH", DEFAULT_MODEL_PATH).into(),
            cors,
        })
    }
}

impl CorsConfig {
    fn is_wildcard(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.is_wildcard() && self.allow_credentials {
            return Err(config_error(
                "a wildcard origin cannot be combined with credentials",
            ));
        }

        self.origins().map(|_| ())
    }

    fn origins(&self) -> Result<Vec<HeaderValue>, Error> {
        self.allowed_origins
            .iter()
            .filter(|origin| origin.as_str() != "*")
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|err| config_error(format!("origin {}: {}", origin, err)))
            })
            .collect()
    }

    pub fn layer(&self) -> Result<CorsLayer, Error> {
        self.validate()?;

        if self.is_wildcard() {
            return Ok(CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any));
        }

        let layer = CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.origins()?))
            .allow_methods(AllowMethods::list([
                Method::GET,
                Method::POST,
                Method::OPTIONS,
            ]))
            .allow_headers(AllowHeaders::list([
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                header::ACCEPT,
            ]))
            .allow_credentials(self.allow_credentials);

        Ok(layer)
    }
}
