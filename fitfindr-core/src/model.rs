use serde::{Deserialize, Serialize};

/// Importance weight of a single preference, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Importance(u8);

impl Importance {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Clamp `value` into the allowed range.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Importance {
    fn default() -> Self {
        Self(3)
    }
}

impl From<u8> for Importance {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Importance> for u8 {
    fn from(value: Importance) -> Self {
        value.0
    }
}

impl std::fmt::Display for Importance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lowest acceptable rating, `0.0..=5.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct MinRating(f64);

impl MinRating {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 5.0;

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for MinRating {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<MinRating> for f64 {
    fn from(value: MinRating) -> Self {
        value.0
    }
}

/// Search radius in whole kilometers, `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct MaxDistance(u8);

impl MaxDistance {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(km: u8) -> Self {
        Self(km.clamp(Self::MIN, Self::MAX))
    }

    pub fn km(self) -> u8 {
        self.0
    }
}

impl Default for MaxDistance {
    fn default() -> Self {
        Self(5)
    }
}

impl From<u8> for MaxDistance {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<MaxDistance> for u8 {
    fn from(value: MaxDistance) -> Self {
        value.0
    }
}

/// Free-text keyword the backend matches against gym reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFilter {
    pub keyword: String,
    pub importance: Importance,
}

/// Full payload of `POST /api/recommendations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceInput {
    pub location: String,
    pub hygiene: Importance,
    pub equipment_quality: Importance,
    pub less_crowd: Importance,
    pub trainer_knowledge: Importance,
    pub price: Importance,
    pub amenities: Importance,
    pub atmosphere: Importance,
    pub custom_filters: Vec<CustomFilter>,
    pub min_rating: MinRating,
    pub max_distance: MaxDistance,
}

impl PreferenceInput {
    /// Input for `location` with every other field at its default.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            hygiene: Importance::default(),
            equipment_quality: Importance::default(),
            less_crowd: Importance::default(),
            trainer_knowledge: Importance::default(),
            price: Importance::default(),
            amenities: Importance::default(),
            atmosphere: Importance::default(),
            custom_filters: Vec::new(),
            min_rating: MinRating::default(),
            max_distance: MaxDistance::default(),
        }
    }
}

/// One recommended gym as scored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GymResult {
    pub gym_name: String,
    pub tailored_rating: f64,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Response of `POST /api/geocode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEcho {
    pub latitude: f64,
    pub longitude: f64,
    pub formatted_address: String,
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
