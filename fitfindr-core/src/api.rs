use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use crate::{Config, GymResult, HealthStatus, LocationEcho, PreferenceInput};

pub mod http;

pub use http::HttpRecommendationApi;

/// Message shown when the backend gives no usable detail.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to fetch gym recommendations";

/// Fallback for a failed geocode call.
pub const GEOCODE_FALLBACK_MESSAGE: &str = "Failed to geocode location";

/// Failure of a single call to the recommendation backend.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("backend responded with status {status}{}", detail_suffix(.detail))]
    Server { status: u16, detail: Option<String> },

    #[error("request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request cancelled")]
    Cancelled,
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

impl RequestError {
    /// Human-readable text for the form: the server's detail when it sent one.
    pub fn display_message(&self) -> String {
        self.display_message_or(FALLBACK_ERROR_MESSAGE)
    }

    /// Same as [`display_message`](Self::display_message) with a caller-chosen fallback.
    pub fn display_message_or(&self, fallback: &str) -> String {
        match self {
            RequestError::Server { detail: Some(detail), .. } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Remote recommendation service. Each call is one-shot and stateless.
#[async_trait]
pub trait RecommendationApi: Send + Sync + Debug {
    async fn get_recommendations(
        &self,
        input: &PreferenceInput,
    ) -> Result<Vec<GymResult>, RequestError>;

    async fn geocode_location(&self, location: &str) -> Result<LocationEcho, RequestError>;

    async fn health_check(&self) -> Result<HealthStatus, RequestError>;
}

/// Construct the HTTP client for the base URL resolved from `config`.
pub fn api_from_config(config: &Config) -> Box<dyn RecommendationApi> {
    Box::new(HttpRecommendationApi::new(config.api_base_url()))
}
