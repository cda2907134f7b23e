use crate::model::GymResult;

use super::format_rating;

/// Zoom level the map opens at.
pub const DEFAULT_ZOOM: u8 = 13;

/// Placeholder text for an empty result set.
pub const NO_DATA_MESSAGE: &str = "No gyms to display";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapCenter {
    pub latitude: f64,
    pub longitude: f64,
}

/// One pin with its popup content.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker<'a> {
    pub name: &'a str,
    pub rating: String,
    pub website: Option<&'a str>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapView<'a> {
    NoData,
    Centered { center: MapCenter, zoom: u8, markers: Vec<MapMarker<'a>> },
}

/// Center on the mean coordinate, one marker per gym.
pub fn map_view(gyms: &[GymResult]) -> MapView<'_> {
    if gyms.is_empty() {
        return MapView::NoData;
    }

    let n = gyms.len() as f64;
    let latitude = gyms.iter().map(|g| g.latitude).sum::<f64>() / n;
    let longitude = gyms.iter().map(|g| g.longitude).sum::<f64>() / n;

    let markers = gyms
        .iter()
        .map(|g| MapMarker {
            name: &g.gym_name,
            rating: format_rating(g.tailored_rating),
            website: g.website.as_deref(),
            latitude: g.latitude,
            longitude: g.longitude,
        })
        .collect();

    MapView::Centered { center: MapCenter { latitude, longitude }, zoom: DEFAULT_ZOOM, markers }
}
