//! Core library for the `fitfindr` CLI.
//!
//! This crate defines:
//! - The typed client for the gym recommendation backend
//! - The preference form and its submit flow
//! - Page state and the list, map and chart view models
//! - CSV export and configuration handling
//!
//! Scoring, geocoding and review analysis happen on the backend; this crate
//! only sends preferences and presents what comes back.

pub mod api;
pub mod cancel;
pub mod collector;
pub mod config;
pub mod model;
pub mod page;
pub mod render;

pub use api::{HttpRecommendationApi, RecommendationApi, RequestError};
pub use cancel::CancellationToken;
pub use collector::{FormState, Preference, PreferenceCollector, SubmitOutcome, ValidationError};
pub use config::Config;
pub use model::{
    CustomFilter, GymResult, HealthStatus, Importance, LocationEcho, MaxDistance, MinRating,
    PreferenceInput,
};
pub use page::{PageComposer, PageState, Panel};
pub use render::ViewMode;

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::api::{RecommendationApi, RequestError};
    use crate::model::{GymResult, HealthStatus, LocationEcho, PreferenceInput};

    pub fn gym(name: &str, rating: f64) -> GymResult {
        gym_at(name, rating, 30.2672, -97.7431)
    }

    pub fn gym_at(name: &str, rating: f64, latitude: f64, longitude: f64) -> GymResult {
        GymResult {
            gym_name: name.to_string(),
            tailored_rating: rating,
            address: "1 Main St".to_string(),
            phone: None,
            website: None,
            latitude,
            longitude,
        }
    }

    #[derive(Debug)]
    enum Reply {
        Gyms(Vec<GymResult>),
        Status(u16, Option<String>),
    }

    /// In-memory backend that answers every call the same way.
    #[derive(Debug)]
    pub struct StubApi {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl StubApi {
        pub fn ok(gyms: Vec<GymResult>) -> Self {
            Self { reply: Reply::Gyms(gyms), calls: AtomicUsize::new(0) }
        }

        pub fn err(status: u16, detail: Option<&str>) -> Self {
            Self {
                reply: Reply::Status(status, detail.map(str::to_string)),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn error(&self) -> Option<RequestError> {
            match &self.reply {
                Reply::Status(status, detail) => {
                    Some(RequestError::Server { status: *status, detail: detail.clone() })
                }
                Reply::Gyms(_) => None,
            }
        }
    }

    #[async_trait]
    impl RecommendationApi for StubApi {
        async fn get_recommendations(
            &self,
            _input: &PreferenceInput,
        ) -> Result<Vec<GymResult>, RequestError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Reply::Gyms(gyms) => Ok(gyms.clone()),
                Reply::Status(..) => Err(self.error().unwrap()),
            }
        }

        async fn geocode_location(&self, location: &str) -> Result<LocationEcho, RequestError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.error() {
                Some(err) => Err(err),
                None => Ok(LocationEcho {
                    latitude: 30.2672,
                    longitude: -97.7431,
                    formatted_address: location.to_string(),
                }),
            }
        }

        async fn health_check(&self) -> Result<HealthStatus, RequestError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.error() {
                Some(err) => Err(err),
                None => Ok(HealthStatus { status: "healthy".to_string() }),
            }
        }
    }
}
