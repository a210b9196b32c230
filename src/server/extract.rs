use async_trait::async_trait;
use axum::{
    body::HttpBody,
    extract::{FromRequest, Json, RequestParts},
    BoxError,
};
use serde::de::DeserializeOwned;

use crate::error::Error;

/// `Json` whose rejections are reported as crate errors, so a broken body
/// or a missing content type answers 422 with the usual error shape.
pub struct Payload<T>(pub T);

#[async_trait]
impl<T, B> FromRequest<B> for Payload<T>
where
    T: DeserializeOwned + Send,
    B: HttpBody + Send,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    type Rejection = Error;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req).await?;

        Ok(Self(value))
    }
}
