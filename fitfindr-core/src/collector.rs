//! The preference form: field state, custom filters and the submit flow.

use thiserror::Error;
use tracing::{debug, info};

use crate::api::{RecommendationApi, RequestError};
use crate::cancel::{CancellationToken, with_cancel};
use crate::model::{CustomFilter, GymResult, Importance, MaxDistance, MinRating, PreferenceInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Editing,
    Submitting,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Location is required")]
    EmptyLocation,
}

/// The seven weighted preferences, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preference {
    Hygiene,
    EquipmentQuality,
    LessCrowd,
    TrainerKnowledge,
    Price,
    Amenities,
    Atmosphere,
}

impl Preference {
    pub const fn all() -> &'static [Preference] {
        &[
            Preference::Hygiene,
            Preference::EquipmentQuality,
            Preference::LessCrowd,
            Preference::TrainerKnowledge,
            Preference::Price,
            Preference::Amenities,
            Preference::Atmosphere,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Preference::Hygiene => "Hygiene",
            Preference::EquipmentQuality => "Equipment Quality",
            Preference::LessCrowd => "Less Crowded",
            Preference::TrainerKnowledge => "Trainer Knowledge",
            Preference::Price => "Price",
            Preference::Amenities => "Amenities",
            Preference::Atmosphere => "Atmosphere",
        }
    }
}

impl std::fmt::Display for Preference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A submission in flight, stamped with the generation it belongs to.
#[derive(Debug)]
pub struct Submission {
    generation: u64,
    input: PreferenceInput,
    token: CancellationToken,
}

impl Submission {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn input(&self) -> &PreferenceInput {
        &self.input
    }

    /// Issue the request; resolves early with `Cancelled` if superseded.
    pub async fn send<A>(&self, api: &A) -> Result<Vec<GymResult>, RequestError>
    where
        A: RecommendationApi + ?Sized,
    {
        with_cancel(&self.token, api.get_recommendations(&self.input)).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Results were handed to the callback.
    Delivered { count: usize },
    /// The request failed; the message is kept in `last_error`.
    Failed { message: String },
    /// A newer submission started; the response was dropped.
    Stale,
}

#[derive(Debug, Clone)]
pub struct PreferenceCollector {
    location: String,
    hygiene: Importance,
    equipment_quality: Importance,
    less_crowd: Importance,
    trainer_knowledge: Importance,
    price: Importance,
    amenities: Importance,
    atmosphere: Importance,
    custom_filters: Vec<CustomFilter>,
    new_filter_importance: Importance,
    min_rating: MinRating,
    max_distance: MaxDistance,

    state: FormState,
    last_error: Option<String>,
    generation: u64,
    in_flight: Option<CancellationToken>,
}

impl Default for PreferenceCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceCollector {
    pub fn new() -> Self {
        Self {
            location: String::new(),
            hygiene: Importance::default(),
            equipment_quality: Importance::default(),
            less_crowd: Importance::default(),
            trainer_knowledge: Importance::default(),
            price: Importance::default(),
            amenities: Importance::default(),
            atmosphere: Importance::default(),
            custom_filters: Vec::new(),
            new_filter_importance: Importance::default(),
            min_rating: MinRating::default(),
            max_distance: MaxDistance::default(),
            state: FormState::Editing,
            last_error: None,
            generation: 0,
            in_flight: None,
        }
    }

    /// Pre-fill every field from an existing input.
    pub fn from_input(input: PreferenceInput) -> Self {
        Self {
            location: input.location,
            hygiene: input.hygiene,
            equipment_quality: input.equipment_quality,
            less_crowd: input.less_crowd,
            trainer_knowledge: input.trainer_knowledge,
            price: input.price,
            amenities: input.amenities,
            atmosphere: input.atmosphere,
            custom_filters: input.custom_filters,
            min_rating: input.min_rating,
            max_distance: input.max_distance,
            ..Self::new()
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Whether a submission has started and not yet been finished.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn importance(&self, pref: Preference) -> Importance {
        match pref {
            Preference::Hygiene => self.hygiene,
            Preference::EquipmentQuality => self.equipment_quality,
            Preference::LessCrowd => self.less_crowd,
            Preference::TrainerKnowledge => self.trainer_knowledge,
            Preference::Price => self.price,
            Preference::Amenities => self.amenities,
            Preference::Atmosphere => self.atmosphere,
        }
    }

    pub fn set_importance(&mut self, pref: Preference, value: u8) {
        let value = Importance::new(value);
        let slot = match pref {
            Preference::Hygiene => &mut self.hygiene,
            Preference::EquipmentQuality => &mut self.equipment_quality,
            Preference::LessCrowd => &mut self.less_crowd,
            Preference::TrainerKnowledge => &mut self.trainer_knowledge,
            Preference::Price => &mut self.price,
            Preference::Amenities => &mut self.amenities,
            Preference::Atmosphere => &mut self.atmosphere,
        };
        *slot = value;
    }

    pub fn min_rating(&self) -> MinRating {
        self.min_rating
    }

    pub fn set_min_rating(&mut self, value: f64) {
        self.min_rating = MinRating::new(value);
    }

    pub fn max_distance(&self) -> MaxDistance {
        self.max_distance
    }

    pub fn set_max_distance(&mut self, km: u8) {
        self.max_distance = MaxDistance::new(km);
    }

    pub fn custom_filters(&self) -> &[CustomFilter] {
        &self.custom_filters
    }

    pub fn new_filter_importance(&self) -> Importance {
        self.new_filter_importance
    }

    pub fn set_new_filter_importance(&mut self, value: u8) {
        self.new_filter_importance = Importance::new(value);
    }

    /// Append a filter using the pending importance, which then resets to 3.
    ///
    /// Blank keywords are ignored. Duplicates are kept.
    pub fn add_filter(&mut self, keyword: &str) -> bool {
        let importance = std::mem::take(&mut self.new_filter_importance);
        if keyword.trim().is_empty() {
            self.new_filter_importance = importance;
            return false;
        }

        self.custom_filters.push(CustomFilter { keyword: keyword.to_string(), importance });
        true
    }

    pub fn remove_filter(&mut self, index: usize) -> Option<CustomFilter> {
        if index < self.custom_filters.len() { Some(self.custom_filters.remove(index)) } else { None }
    }

    /// Snapshot the form as a request payload.
    pub fn build_input(&self) -> Result<PreferenceInput, ValidationError> {
        if self.location.trim().is_empty() {
            return Err(ValidationError::EmptyLocation);
        }

        Ok(PreferenceInput {
            location: self.location.clone(),
            hygiene: self.hygiene,
            equipment_quality: self.equipment_quality,
            less_crowd: self.less_crowd,
            trainer_knowledge: self.trainer_knowledge,
            price: self.price,
            amenities: self.amenities,
            atmosphere: self.atmosphere,
            custom_filters: self.custom_filters.clone(),
            min_rating: self.min_rating,
            max_distance: self.max_distance,
        })
    }

    /// Validate, enter `Submitting`, and supersede any earlier submission.
    pub fn begin_submit(&mut self) -> Result<Submission, ValidationError> {
        let input = self.build_input()?;

        if let Some(previous) = self.in_flight.take() {
            debug!(generation = self.generation, "superseding in-flight submission");
            previous.cancel();
        }

        self.generation += 1;
        self.last_error = None;
        self.state = FormState::Submitting;

        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());

        Ok(Submission { generation: self.generation, input, token })
    }

    /// Apply the result of `submission`; stale generations are dropped.
    pub fn finish<F>(
        &mut self,
        submission: Submission,
        result: Result<Vec<GymResult>, RequestError>,
        on_success: F,
    ) -> SubmitOutcome
    where
        F: FnOnce(String, Vec<GymResult>),
    {
        if submission.generation != self.generation || self.in_flight.is_none() {
            debug!(
                stale = submission.generation,
                current = self.generation,
                "discarding stale response"
            );
            return SubmitOutcome::Stale;
        }

        self.in_flight = None;
        self.state = FormState::Editing;

        match result {
            Ok(gyms) => {
                let count = gyms.len();
                info!(count, location = %submission.input.location, "recommendations received");
                on_success(submission.input.location, gyms);
                SubmitOutcome::Delivered { count }
            }
            Err(err) => {
                info!(error = %err, "recommendation request failed");
                let message = err.display_message();
                self.last_error = Some(message.clone());
                SubmitOutcome::Failed { message }
            }
        }
    }

    /// Full submit flow against `api`.
    pub async fn submit<A, F>(
        &mut self,
        api: &A,
        on_success: F,
    ) -> Result<SubmitOutcome, ValidationError>
    where
        A: RecommendationApi + ?Sized,
        F: FnOnce(String, Vec<GymResult>),
    {
        let submission = self.begin_submit()?;
        let result = submission.send(api).await;
        Ok(self.finish(submission, result, on_success))
    }
}
