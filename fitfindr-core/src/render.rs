//! View models for a finished search.
//!
//! Everything here is a pure function of the result sequence; nothing talks
//! to the network or keeps state between calls.

pub mod chart;
pub mod export;
pub mod list;
pub mod map;
pub mod view;

pub use chart::{ChartBar, RatingTier, chart_bars};
pub use export::{EXPORT_FILE_NAME, to_csv, write_csv};
pub use list::{ListEntry, list_entries};
pub use map::{MapCenter, MapMarker, MapView, map_view};
pub use view::{ResultsSummary, ViewMode};

/// One decimal, as shown on rating badges and popups.
pub fn format_rating(rating: f64) -> String {
    format!("{rating:.1}")
}
