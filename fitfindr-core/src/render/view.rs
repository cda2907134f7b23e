use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, str::FromStr};

use crate::model::GymResult;

/// Which of the three mutually exclusive result views is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Map,
    Chart,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::List => "list",
            ViewMode::Map => "map",
            ViewMode::Chart => "chart",
        }
    }

    /// Tab caption.
    pub fn title(&self) -> &'static str {
        match self {
            ViewMode::List => "List View",
            ViewMode::Map => "Map View",
            ViewMode::Chart => "Analytics",
        }
    }

    pub const fn all() -> &'static [ViewMode] {
        &[ViewMode::List, ViewMode::Map, ViewMode::Chart]
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ViewMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "list" => Ok(ViewMode::List),
            "map" => Ok(ViewMode::Map),
            "chart" => Ok(ViewMode::Chart),
            _ => Err(anyhow::anyhow!("Unknown view '{value}'. Supported views: list, map, chart.")),
        }
    }
}

impl FromStr for ViewMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewMode::try_from(s)
    }
}

/// Header shown above every view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsSummary {
    pub count: usize,
    pub location: String,
}

impl ResultsSummary {
    pub fn new(gyms: &[GymResult], location: &str) -> Self {
        Self { count: gyms.len(), location: location.to_string() }
    }

    pub fn headline(&self) -> String {
        format!("{} Gyms Found", self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_mode_as_str_roundtrip() {
        for mode in ViewMode::all() {
            let parsed = ViewMode::try_from(mode.as_str()).expect("roundtrip should succeed");
            assert_eq!(*mode, parsed);
        }
    }

    #[test]
    fn view_mode_parse_is_case_insensitive() {
        assert_eq!("Chart".parse::<ViewMode>().unwrap(), ViewMode::Chart);
        assert_eq!(" MAP ".parse::<ViewMode>().unwrap(), ViewMode::Map);
    }

    #[test]
    fn unknown_view_error() {
        let err = ViewMode::try_from("table").unwrap_err();
        assert!(err.to_string().contains("Unknown view"));
    }

    #[test]
    fn default_view_is_list() {
        assert_eq!(ViewMode::default(), ViewMode::List);
    }

    #[test]
    fn summary_headline_counts_gyms() {
        let summary = ResultsSummary::new(&[], "Austin, TX");
        assert_eq!(summary.headline(), "0 Gyms Found");
        assert_eq!(summary.location, "Austin, TX");
    }
}
