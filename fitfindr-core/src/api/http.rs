use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::model::{GymResult, HealthStatus, LocationEcho, PreferenceInput};

use super::{RecommendationApi, RequestError};

/// `reqwest`-backed client for the tailored backend.
#[derive(Debug, Clone)]
pub struct HttpRecommendationApi {
    base_url: String,
    http: Client,
}

impl HttpRecommendationApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http: Client::new() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl RecommendationApi for HttpRecommendationApi {
    async fn get_recommendations(
        &self,
        input: &PreferenceInput,
    ) -> Result<Vec<GymResult>, RequestError> {
        let url = self.url("/api/recommendations");
        debug!(%url, location = %input.location, filters = input.custom_filters.len(), "requesting recommendations");

        let res = self.http.post(&url).json(input).send().await?;
        let gyms: Vec<GymResult> = decode(res).await?;

        debug!(count = gyms.len(), "received recommendations");
        Ok(gyms)
    }

    async fn geocode_location(&self, location: &str) -> Result<LocationEcho, RequestError> {
        let url = self.url("/api/geocode");
        debug!(%url, location, "geocoding location");

        let res = self.http.post(&url).query(&[("location", location)]).send().await?;
        decode(res).await
    }

    async fn health_check(&self) -> Result<HealthStatus, RequestError> {
        let url = self.url("/api/health");
        debug!(%url, "health check");

        let res = self.http.get(&url).send().await?;
        decode(res).await
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, RequestError> {
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        warn!(status = status.as_u16(), body = %truncate_body(&body), "backend request failed");
        return Err(RequestError::Server { status: status.as_u16(), detail: error_detail(&body) });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Pull the `detail` field out of a FastAPI-style error body.
fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
