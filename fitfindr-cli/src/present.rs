//! Terminal rendering of the result views.

use std::time::Duration;

use console::{Style, style};
use fitfindr_core::render::{
    ChartBar, ListEntry, MapView, RatingTier, ResultsSummary, ViewMode, chart::CHART_LIMIT,
    chart_bars, list_entries, map::NO_DATA_MESSAGE, map_view,
};
use fitfindr_core::GymResult;
use indicatif::{ProgressBar, ProgressStyle};

const BAR_WIDTH: usize = 40;
const RATING_SCALE: f64 = 10.0;
const MAP_COLS: usize = 48;
const MAP_ROWS: usize = 16;

/// Spinner shown while a request is in flight.
pub fn loading_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.red} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Finding your perfect gyms...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn empty_state() -> String {
    format!(
        "{}\nEnter your location and preferences to get started",
        style("Ready to Find Your Gym?").bold()
    )
}

pub fn header(gyms: &[GymResult], location: &str, active: ViewMode) -> String {
    let summary = ResultsSummary::new(gyms, location);
    let tabs: Vec<String> = ViewMode::all()
        .iter()
        .map(|mode| {
            if *mode == active {
                style(format!("[{}]", mode.title())).red().bold().to_string()
            } else {
                format!(" {} ", mode.title())
            }
        })
        .collect();

    format!("{}\n@ {}\n{}", style(summary.headline()).bold(), summary.location, tabs.join(" "))
}

pub fn render(gyms: &[GymResult], mode: ViewMode) -> String {
    match mode {
        ViewMode::List => list(gyms),
        ViewMode::Map => map(gyms),
        ViewMode::Chart => chart(gyms),
    }
}

pub fn list(gyms: &[GymResult]) -> String {
    list_entries(gyms).iter().map(list_entry).collect::<Vec<_>>().join("\n\n")
}

fn list_entry(entry: &ListEntry<'_>) -> String {
    let mut out = format!(
        "{}. {}  {}\n   {}",
        entry.rank,
        style(entry.name).bold(),
        style(format!("* {}", entry.badge)).red().bold(),
        entry.address
    );
    if let Some(phone) = entry.phone {
        out.push_str(&format!("\n   tel: {phone}"));
    }
    if let Some(website) = entry.website {
        out.push_str(&format!("\n   web: {website}"));
    }
    out
}

pub fn map(gyms: &[GymResult]) -> String {
    let (center, zoom, markers) = match map_view(gyms) {
        MapView::NoData => return NO_DATA_MESSAGE.to_string(),
        MapView::Centered { center, zoom, markers } => (center, zoom, markers),
    };

    let lats = markers.iter().map(|m| m.latitude).chain([center.latitude]);
    let lons = markers.iter().map(|m| m.longitude).chain([center.longitude]);
    let (min_lat, max_lat) = bounds(lats);
    let (min_lon, max_lon) = bounds(lons);

    let mut grid = vec![vec!['.'; MAP_COLS]; MAP_ROWS];
    let cell = |lat: f64, lon: f64| {
        let col = scale(lon, min_lon, max_lon, MAP_COLS);
        // North is up.
        let row = MAP_ROWS - 1 - scale(lat, min_lat, max_lat, MAP_ROWS);
        (row, col)
    };

    let (row, col) = cell(center.latitude, center.longitude);
    grid[row][col] = '+';
    for (i, marker) in markers.iter().enumerate() {
        let (row, col) = cell(marker.latitude, marker.longitude);
        grid[row][col] = marker_symbol(i);
    }

    let mut out = format!(
        "center {:.5}, {:.5} (zoom {zoom})\n",
        center.latitude, center.longitude
    );
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    for (i, marker) in markers.iter().enumerate() {
        out.push_str(&format!(
            "\n{} {} ({}) at {:.5}, {:.5}",
            marker_symbol(i),
            marker.name,
            marker.rating,
            marker.latitude,
            marker.longitude
        ));
        if let Some(website) = marker.website {
            out.push_str(&format!(" {website}"));
        }
    }
    out
}

fn marker_symbol(index: usize) -> char {
    const SYMBOLS: &[u8] = b"123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    SYMBOLS.get(index).map(|b| *b as char).unwrap_or('*')
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

fn scale(value: f64, min: f64, max: f64, cells: usize) -> usize {
    let span = max - min;
    if span <= f64::EPSILON {
        return cells / 2;
    }
    let pos = ((value - min) / span * (cells - 1) as f64).round() as usize;
    pos.min(cells - 1)
}

pub fn chart(gyms: &[GymResult]) -> String {
    let bars = chart_bars(gyms);
    let width = bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);

    let mut out = format!("Top {CHART_LIMIT} Gyms by Rating\n");
    for bar in &bars {
        out.push_str(&chart_row(bar, width));
        out.push('\n');
    }

    let truncated: Vec<_> = bars.iter().filter(|b| b.label != b.full_name).collect();
    if !truncated.is_empty() {
        out.push('\n');
        for bar in truncated {
            out.push_str(&format!("{} = {}\n", bar.label, bar.full_name));
        }
    }
    out
}

fn chart_row(bar: &ChartBar<'_>, width: usize) -> String {
    let ratio = (bar.rating / RATING_SCALE).clamp(0.0, 1.0);
    let filled = (ratio * BAR_WIDTH as f64).round() as usize;
    let blocks = "#".repeat(filled);

    format!(
        "{:<width$} | {} {:.1}",
        bar.label,
        tier_style(bar.tier).apply_to(blocks),
        bar.rating
    )
}

fn tier_style(tier: RatingTier) -> Style {
    match tier {
        RatingTier::High => Style::new().red(),
        RatingTier::Medium => Style::new().color256(208),
        RatingTier::Low => Style::new().yellow(),
        RatingTier::Lowest => Style::new().color256(88),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gym(name: &str, rating: f64, latitude: f64, longitude: f64) -> GymResult {
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

    #[test]
    fn empty_map_shows_placeholder() {
        assert_eq!(map(&[]), "No gyms to display");
    }

    #[test]
    fn map_plots_every_marker() {
        let gyms = vec![gym("A", 8.0, 30.0, -97.0), gym("B", 4.0, 31.0, -98.0)];
        let out = map(&gyms);

        assert!(out.starts_with("center 30.50000, -97.50000 (zoom 13)"));
        assert!(out.contains("1 A (8.0)"));
        assert!(out.contains("2 B (4.0)"));
        assert_eq!(out.lines().filter(|l| l.len() == MAP_COLS).count(), MAP_ROWS);
    }

    #[test]
    fn chart_lists_full_names_for_truncated_labels() {
        let gyms = vec![gym("Twenty Five Char Gym Name", 7.5, 0.0, 0.0)];
        let out = chart(&gyms);

        assert!(out.contains("Twenty Five Char Gym... = Twenty Five Char Gym Name"));
        assert!(out.contains("7.5"));
    }

    #[test]
    fn chart_draws_ten_rows_at_most() {
        let gyms: Vec<_> = (0..15).map(|i| gym(&format!("Gym {i}"), 5.0, 0.0, 0.0)).collect();
        let rows = chart(&gyms).lines().filter(|l| l.contains(" | ")).count();
        assert_eq!(rows, 10);
    }

    #[test]
    fn list_numbers_entries_in_order() {
        let gyms = vec![gym("First", 2.0, 0.0, 0.0), gym("Second", 9.0, 0.0, 0.0)];
        let out = list(&gyms);
        let first = out.find("First").unwrap();
        let second = out.find("Second").unwrap();
        assert!(first < second);
        assert!(out.contains("2. "));
    }

    #[test]
    fn scale_handles_degenerate_span() {
        assert_eq!(scale(5.0, 5.0, 5.0, 10), 5);
        assert_eq!(scale(10.0, 0.0, 10.0, 10), 9);
        assert_eq!(scale(0.0, 0.0, 10.0, 10), 0);
    }
}
