use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Geocoder;
use crate::{
    entities::Coordinates,
    error::{upstream_error, Error},
};

#[derive(Clone, Debug)]
pub struct Nominatim {
    client: reqwest::Client,
    base_url: String,
}

/// Nominatim reports degrees as strings; numbers are accepted too.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn value(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse().ok()?,
        };

        value.is_finite().then(|| value)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub lat: Option<Degrees>,
    #[serde(default)]
    pub lon: Option<Degrees>,
    #[serde(default)]
    pub importance: Option<f64>,
}

impl Candidate {
    fn importance(&self) -> f64 {
        self.importance.unwrap_or(0.0)
    }

    fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(
            self.lat.as_ref()?.value()?,
            self.lon.as_ref()?.value()?,
        ))
    }
}

/// Picks the candidate with the highest importance. The sort is stable, so
/// ties go to the candidate the provider listed first.
pub fn select_best(mut candidates: Vec<Candidate>) -> Option<Coordinates> {
    candidates.sort_by(|a, b| b.importance().total_cmp(&a.importance()));

    candidates.first()?.coordinates()
}

impl Nominatim {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, Error> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').into(),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn search(&self, address: &str) -> Result<Vec<Candidate>, Error> {
        let url = format!("{}/search", self.base_url);

        let res = self
            .client
            .get(url)
            .query(&[("format", "json")])
            .query(&[("q", address)])
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::warn!("geocoder responded with status {}", res.status());
            return Err(upstream_error());
        }

        let candidates: Vec<Candidate> = res.json().await?;

        Ok(candidates)
    }
}

#[async_trait]
impl Geocoder for Nominatim {
    #[tracing::instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Option<Coordinates> {
        let candidates = match self.search(address).await {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::warn!("geocoding failed: {}", err);
                return None;
            }
        };

        if candidates.is_empty() {
            tracing::info!("no results found");
            return None;
        }

        let best = select_best(candidates);

        if best.is_none() {
            tracing::warn!("best candidate had unusable coordinates");
        }

        best
    }
}
