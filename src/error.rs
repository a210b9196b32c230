use axum::extract::{rejection::JsonRejection, Json};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt::{self, Debug, Display};

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self.code {
            1..=99 => StatusCode::INTERNAL_SERVER_ERROR,
            100..=199 => StatusCode::BAD_REQUEST,
            200..=299 => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        model_error(err)
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        invalid_input_error(&rejection.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "code": self.code,
            "detail": self.message,
        }));

        (self.status(), body).into_response()
    }
}

pub fn config_error<T: Display>(err: T) -> Error {
    Error {
        code: 1,
        message: format!("configuration error: {}", err),
    }
}

pub fn model_error<T: Display>(err: T) -> Error {
    Error {
        code: 2,
        message: format!("model error: {}", err),
    }
}

pub fn reqwest_error(_: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn distance_fetch_error() -> Error {
    Error {
        code: 5,
        message: "Error fetching distance".into(),
    }
}

pub fn server_error<T: Debug>(err: T) -> Error {
    Error {
        code: 6,
        message: format!("server error: {:?}", err),
    }
}

pub fn invalid_destination_error() -> Error {
    Error {
        code: 100,
        message: "Invalid destination address".into(),
    }
}

pub fn invalid_input_error(message: &str) -> Error {
    Error {
        code: 200,
        message: message.into(),
    }
}

pub fn feature_count_error(expected: usize, actual: usize) -> Error {
    Error {
        code: 201,
        message: format!("expected {} features, got {}", expected, actual),
    }
}
