use crate::model::GymResult;

/// Bars shown in the chart view.
pub const CHART_LIMIT: usize = 10;

/// Axis labels longer than this many characters are truncated.
pub const LABEL_MAX_CHARS: usize = 20;

/// Bar color bucket, a step function of the tailored rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingTier {
    High,
    Medium,
    Low,
    Lowest,
}

impl RatingTier {
    pub fn for_rating(rating: f64) -> Self {
        if rating >= 7.0 {
            RatingTier::High
        } else if rating >= 5.0 {
            RatingTier::Medium
        } else if rating >= 3.0 {
            RatingTier::Low
        } else {
            RatingTier::Lowest
        }
    }

    pub fn color_hex(&self) -> &'static str {
        match self {
            RatingTier::High => "#dc2626",
            RatingTier::Medium => "#ea580c",
            RatingTier::Low => "#ca8a04",
            RatingTier::Lowest => "#7c2d12",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar<'a> {
    /// Axis label, possibly truncated.
    pub label: String,
    /// Untruncated name for detail display.
    pub full_name: &'a str,
    pub rating: f64,
    pub tier: RatingTier,
}

/// Bars for the first [`CHART_LIMIT`] gyms, in input order.
pub fn chart_bars(gyms: &[GymResult]) -> Vec<ChartBar<'_>> {
    gyms.iter()
        .take(CHART_LIMIT)
        .map(|gym| ChartBar {
            label: axis_label(&gym.gym_name),
            full_name: &gym.gym_name,
            rating: gym.tailored_rating,
            tier: RatingTier::for_rating(gym.tailored_rating),
        })
        .collect()
}

pub fn axis_label(name: &str) -> String {
    match name.char_indices().nth(LABEL_MAX_CHARS) {
        Some((idx, _)) => format!("{}...", &name[..idx]),
        None => name.to_string(),
    }
}
